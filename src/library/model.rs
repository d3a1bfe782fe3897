use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Stable identity of an imported track, assigned at import time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(Uuid);

impl TrackId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle to the decodable byte stream behind a track.
#[derive(Clone)]
pub enum MediaSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

/// Resolved playback locator handed to the output device.
///
/// Session-scoped: it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(String);

impl Locator {
    pub(crate) fn resolve(id: TrackId, source: &MediaSource) -> Self {
        match source {
            MediaSource::File(path) => Self(format!("file://{}", path.display())),
            MediaSource::Memory(_) => Self(format!("memory:{id}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry handed over by the import mechanism.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub filename: String,
    pub source: MediaSource,
    pub mime: String,
}

impl RawFile {
    pub fn new(filename: impl Into<String>, source: MediaSource, mime: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            source,
            mime: mime.into(),
        }
    }

    pub fn is_audio(&self) -> bool {
        self.mime.trim().to_ascii_lowercase().starts_with("audio/")
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub source: MediaSource,
    pub locator: Locator,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Known only once the output device has loaded the track.
    pub duration: Option<Duration>,
}

impl Track {
    pub(crate) fn from_raw(raw: RawFile) -> Self {
        let id = TrackId::generate();
        let locator = Locator::resolve(id, &raw.source);
        Self {
            id,
            name: display_name(&raw.filename),
            source: raw.source,
            locator,
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            genre: UNKNOWN_GENRE.to_string(),
            duration: None,
        }
    }
}

/// Strip the last extension from `filename` (`song.tar.mp3` -> `song.tar`).
///
/// Names without an extension, dotfiles and trailing dots are kept as-is.
pub(crate) fn display_name(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
            stem.to_string()
        }
        _ => filename.to_string(),
    }
}
