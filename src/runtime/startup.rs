use std::path::Path;

use crate::config::{self, RepeatModeSetting, SequenceChangeSetting};
use crate::library::ImportReport;
use crate::playback::{RepeatMode, SequenceChangePolicy};
use crate::session::Session;
use crate::transport::TransportDevice;

pub fn repeat_mode(setting: RepeatModeSetting) -> RepeatMode {
    match setting {
        RepeatModeSetting::Off => RepeatMode::Off,
        RepeatModeSetting::RepeatAll => RepeatMode::RepeatAll,
        RepeatModeSetting::RepeatOne => RepeatMode::RepeatOne,
    }
}

pub fn sequence_policy(setting: SequenceChangeSetting) -> SequenceChangePolicy {
    match setting {
        SequenceChangeSetting::Stop => SequenceChangePolicy::Stop,
        SequenceChangeSetting::Continue => SequenceChangePolicy::Continue,
    }
}

pub fn apply_playback_defaults<T: TransportDevice>(
    session: &mut Session<T>,
    settings: &config::Settings,
) {
    session.set_shuffle(settings.playback.shuffle);
    session.set_repeat_mode(repeat_mode(settings.playback.repeat_mode));
    session.set_volume(settings.audio.volume_percent);
}

/// One-line summary of an import for the status box.
pub fn import_notice(source: &Path, report: &ImportReport) -> String {
    match (report.imported.len(), report.skipped.len()) {
        (0, 0) => format!("Nothing to import in {}", source.display()),
        (n, 0) => format!("Imported {n} track(s) from {}", source.display()),
        (n, s) => format!(
            "Imported {n} track(s) from {}, skipped {s} non-audio file(s)",
            source.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::TrackId;
    use crate::transport::mock::{Command, RecordingTransport};

    #[test]
    fn playback_defaults_reach_the_session() {
        let mut settings = config::Settings::default();
        settings.playback.shuffle = true;
        settings.playback.repeat_mode = RepeatModeSetting::RepeatOne;
        settings.audio.volume_percent = 30;

        let mut session = Session::new(RecordingTransport::default());
        apply_playback_defaults(&mut session, &settings);

        assert!(session.cursor().is_shuffling);
        assert_eq!(session.cursor().repeat_mode, RepeatMode::RepeatOne);
        assert_eq!(session.volume_percent(), 30);
        assert_eq!(session.transport().last(), Some(&Command::SetVolume(0.3)));
    }

    #[test]
    fn import_notice_mentions_skips() {
        let report = ImportReport {
            imported: vec![TrackId::generate(), TrackId::generate()],
            skipped: vec!["cover.jpg".to_string()],
        };
        let notice = import_notice(Path::new("/music"), &report);
        assert!(notice.starts_with("Imported 2 track(s) from /music"));
        assert!(notice.ends_with("skipped 1 non-audio file(s)"));
        assert_eq!(
            import_notice(Path::new("/x"), &ImportReport::default()),
            "Nothing to import in /x"
        );
    }
}
