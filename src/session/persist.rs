//! Persistence boundary.
//!
//! Only ids, names, metadata and playlist membership are saved. Sources and
//! locators belong to the running session and are never written out.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::library::TrackId;
use crate::playlist::{Playlist, PlaylistId};
use crate::transport::TransportDevice;

use super::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedTrack {
    pub id: TrackId,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlaylist {
    pub id: PlaylistId,
    pub name: String,
    pub tracks: Vec<TrackId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub tracks: Vec<PersistedTrack>,
    pub playlists: Vec<PersistedPlaylist>,
}

pub trait StateStore {
    fn save(&mut self, state: &PersistedState) -> Result<()>;
    fn load(&mut self) -> Result<Option<PersistedState>>;
}

/// Keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl StateStore for NullStore {
    fn save(&mut self, _state: &PersistedState) -> Result<()> {
        Ok(())
    }

    fn load(&mut self) -> Result<Option<PersistedState>> {
        Ok(None)
    }
}

impl<T: TransportDevice> Session<T> {
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            tracks: self
                .library
                .tracks()
                .iter()
                .map(|t| PersistedTrack {
                    id: t.id,
                    name: t.name.clone(),
                    artist: t.artist.clone(),
                    album: t.album.clone(),
                    genre: t.genre.clone(),
                    duration: t.duration,
                })
                .collect(),
            playlists: self
                .playlists
                .all()
                .iter()
                .map(|p| PersistedPlaylist {
                    id: p.id,
                    name: p.name.clone(),
                    tracks: p.tracks().to_vec(),
                })
                .collect(),
        }
    }

    /// Apply whatever the store holds to the tracks already in the library.
    ///
    /// Saved tracks that are not in the library are ignored, and so are
    /// playlist entries pointing at them. Returns false if the store was empty.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(state) = self.store.load()? else {
            debug!("nothing to restore");
            return Ok(false);
        };

        for saved in &state.tracks {
            if let Some(track) = self
                .library
                .tracks_mut()
                .iter_mut()
                .find(|t| t.id == saved.id)
            {
                track.name.clone_from(&saved.name);
                track.artist.clone_from(&saved.artist);
                track.album.clone_from(&saved.album);
                track.genre.clone_from(&saved.genre);
                if saved.duration.is_some() {
                    track.duration = saved.duration;
                }
            }
        }

        let playlists: Vec<Playlist> = state
            .playlists
            .into_iter()
            .map(|saved| {
                let mut playlist = Playlist::new(saved.id, saved.name);
                for id in saved.tracks {
                    if self.library.contains(id) {
                        playlist.push(id);
                    }
                }
                playlist
            })
            .collect();
        info!(playlists = playlists.len(), "state restored");
        self.playlists.replace_all(playlists);

        if let Some(id) = self.selected {
            if self.playlists.find(id).is_none() {
                self.selected = None;
            }
        }
        self.reconcile_cursor();
        Ok(true)
    }
}
