use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{MediaSource, RawFile};

const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a MIME type for `path`; only configured extensions count as audio.
fn mime_for(path: &Path, settings: &LibrarySettings) -> String {
    let Some(ext) = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
    else {
        return OCTET_STREAM.to_string();
    };

    let configured = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext);
    if !configured {
        return OCTET_STREAM.to_string();
    }

    let subtype = match ext.as_str() {
        "mp3" => "mpeg",
        "m4a" | "aac" => "mp4",
        "oga" => "ogg",
        "wav" => "wav",
        other => other,
    };
    format!("audio/{subtype}")
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Walk `root` (a directory or a single file) and hand every file over to the
/// import boundary, in file-name order.
///
/// Non-audio files are emitted with a non-audio MIME type; the registry is the
/// one place that decides what gets skipped.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Vec<RawFile> {
    let mut files: Vec<RawFile> = Vec::new();

    let mut walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        files.push(RawFile::new(
            filename,
            MediaSource::File(path.to_path_buf()),
            mime_for(path, settings),
        ));
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[RawFile]) -> Vec<&str> {
        files.iter().map(|f| f.filename.as_str()).collect()
    }

    #[test]
    fn mime_for_maps_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert_eq!(mime_for(Path::new("/tmp/a.mp3"), &settings), "audio/mpeg");
        assert_eq!(mime_for(Path::new("/tmp/a.MP3"), &settings), "audio/mpeg");
        assert_eq!(mime_for(Path::new("/tmp/a.flac"), &settings), "audio/flac");
        assert_eq!(mime_for(Path::new("/tmp/a.m4a"), &settings), "audio/mp4");
        assert_eq!(mime_for(Path::new("/tmp/a.ogg"), &settings), "audio/ogg");
        assert_eq!(mime_for(Path::new("/tmp/a.txt"), &settings), OCTET_STREAM);
        assert_eq!(mime_for(Path::new("/tmp/a"), &settings), OCTET_STREAM);
    }

    #[test]
    fn mime_for_ignores_unconfigured_audio_extensions() {
        let settings = LibrarySettings {
            extensions: vec![".flac".into()],
            ..LibrarySettings::default()
        };
        assert_eq!(mime_for(Path::new("/tmp/a.flac"), &settings), "audio/flac");
        assert_eq!(mime_for(Path::new("/tmp/a.mp3"), &settings), OCTET_STREAM);
    }

    #[test]
    fn scan_emits_every_file_in_name_order() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let files = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(names(&files), vec!["a.ogg", "b.MP3", "c.txt"]);
        assert!(files[0].is_audio());
        assert!(files[1].is_audio());
        assert!(!files[2].is_audio());
    }

    #[test]
    fn scan_accepts_a_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("only.wav");
        fs::write(&file, b"not real").unwrap();

        let files = scan(&file, &LibrarySettings::default());
        assert_eq!(names(&files), vec!["only.wav"]);
        assert_eq!(files[0].mime, "audio/wav");
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let files = scan(dir.path(), &settings);
        assert_eq!(names(&files), vec!["visible.mp3"]);
    }

    #[test]
    fn scan_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let files = scan(dir.path(), &settings);
        assert_eq!(names(&files), vec!["root.mp3"]);
    }

    #[test]
    fn scan_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(d1.join("one.mp3"), b"not real").unwrap();
        fs::write(d2.join("two.mp3"), b"not real").unwrap();

        // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
        let settings = LibrarySettings {
            max_depth: Some(2),
            ..LibrarySettings::default()
        };
        let files = scan(dir.path(), &settings);

        let found = names(&files);
        assert!(found.contains(&"root.mp3"));
        assert!(found.contains(&"one.mp3"));
        assert!(!found.contains(&"two.mp3"));
    }
}
