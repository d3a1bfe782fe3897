use tracing::info;

use crate::error::{Error, Result};
use crate::library::TrackId;

use super::model::{Playlist, PlaylistId};

#[derive(Debug, Default)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist. Blank names are ignored.
    pub fn create(&mut self, name: &str) -> Option<PlaylistId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = PlaylistId::generate();
        self.playlists.push(Playlist::new(id, name.to_string()));
        info!(playlist = %id, name, "playlist created");
        Some(id)
    }

    /// Append `track` to `playlist`. Returns `Ok(false)` if it already was a member.
    ///
    /// The caller is responsible for checking that `track` exists in the library.
    pub fn add_track(&mut self, playlist: PlaylistId, track: TrackId) -> Result<bool> {
        if self.playlists.is_empty() {
            return Err(Error::NoPlaylistsAvailable);
        }
        let list = self
            .find_mut(playlist)
            .ok_or(Error::PlaylistNotFound(playlist))?;
        Ok(list.push(track))
    }

    pub fn delete(&mut self, id: PlaylistId) -> Result<Playlist> {
        let pos = self
            .playlists
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::PlaylistNotFound(id))?;
        let removed = self.playlists.remove(pos);
        info!(playlist = %id, name = %removed.name, "playlist deleted");
        Ok(removed)
    }

    /// Prune `track` from every playlist. Returns how many playlists changed.
    pub fn remove_track_everywhere(&mut self, track: TrackId) -> usize {
        self.playlists
            .iter_mut()
            .map(|p| p.remove(track))
            .filter(|&removed| removed)
            .count()
    }

    pub fn find(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    fn find_mut(&mut self, id: PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Replace the whole store (used when restoring saved state).
    pub(crate) fn replace_all(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
    }
}
