use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::library::TrackId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(Uuid);

impl PlaylistId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named, ordered set of track references.
///
/// Membership is a set by id; insertion order is kept.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    tracks: Vec<TrackId>,
}

impl Playlist {
    pub(crate) fn new(id: PlaylistId, name: String) -> Self {
        Self {
            id,
            name,
            tracks: Vec::new(),
        }
    }

    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains(&id)
    }

    /// Append `id` unless it is already a member. Returns true if it was added.
    pub(crate) fn push(&mut self, id: TrackId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.tracks.push(id);
        true
    }

    /// Drop `id` from the playlist. Returns true if it was a member.
    pub(crate) fn remove(&mut self, id: TrackId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|&t| t != id);
        self.tracks.len() != before
    }
}
