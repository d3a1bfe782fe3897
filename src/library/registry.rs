//! The track registry: canonical owner of every imported track.

use std::time::Duration;

use tracing::{debug, info};

use super::model::{RawFile, Track, TrackId};

/// Outcome of one import batch.
///
/// Skipped entries are not errors; they are reported so the front end can
/// mention them if it wants to.
#[derive(Debug, Default, Clone)]
pub struct ImportReport {
    pub imported: Vec<TrackId>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a track for every audio entry, in arrival order.
    pub fn import(&mut self, files: impl IntoIterator<Item = RawFile>) -> ImportReport {
        let mut report = ImportReport::default();
        for raw in files {
            if !raw.is_audio() {
                debug!(file = %raw.filename, mime = %raw.mime, "skipping non-audio entry");
                report.skipped.push(raw.filename);
                continue;
            }
            let track = Track::from_raw(raw);
            report.imported.push(track.id);
            self.tracks.push(track);
        }
        info!(
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            total = self.tracks.len(),
            "import finished"
        );
        report
    }

    /// Remove a track from the library, returning it if it was present.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.tracks.iter().position(|t| t.id == id)?;
        Some(self.tracks.remove(pos))
    }

    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.find(id).is_some()
    }

    /// Record the duration reported by the output device. Returns false for unknown ids.
    pub fn set_duration(&mut self, id: TrackId, duration: Duration) -> bool {
        match self.tracks.iter_mut().find(|t| t.id == id) {
            Some(track) => {
                track.duration = Some(duration);
                true
            }
            None => false,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
