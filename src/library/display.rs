use std::time::Duration;

use crate::config::TrackField;

use super::model::Track;

/// Format a `Duration` as `M:SS`.
pub fn format_mss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Blank fields and unknown durations are left out; falls back to the track
/// name when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackField::Name => Some(track.name.trim().to_string()),
            TrackField::Artist => Some(track.artist.trim().to_string()),
            TrackField::Album => Some(track.album.trim().to_string()),
            TrackField::Genre => Some(track.genre.trim().to_string()),
            TrackField::Duration => track.duration.map(format_mss),
            TrackField::Locator => Some(track.locator.to_string()),
        };
        if let Some(part) = part.filter(|p| !p.is_empty()) {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        track.name.clone()
    } else {
        parts.join(sep)
    }
}
