//! The session: one owned context for the library, the playlists, the view
//! filter, the playback cursor and the output device.
//!
//! Every mutation goes through [`Session`]; read-only snapshots are handed
//! to the front end. The active sequence is never stored, it is recomputed
//! from the selection and the filter each time it is needed.

mod events;
mod persist;
mod transport_ops;

use std::path::Path;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::LibrarySettings;
use crate::error::{Error, Result};
use crate::library::{
    GenreFilter, ImportReport, RawFile, Track, TrackId, TrackRegistry, ViewFilter, scan,
};
use crate::playback::{Cursor, PlaybackState, SequenceChangePolicy};
use crate::playlist::{Playlist, PlaylistId, PlaylistStore};
use crate::transport::{RequestId, TransportDevice};

pub use persist::{NullStore, PersistedPlaylist, PersistedState, PersistedTrack, StateStore};

/// What the now-playing area shows.
#[derive(Debug, Clone, Copy)]
pub struct NowPlaying<'a> {
    pub track: &'a Track,
    /// `None` while the track is not part of the active sequence.
    pub index: Option<usize>,
    pub state: PlaybackState,
    pub position: Duration,
    pub duration: Option<Duration>,
}

pub struct Session<T: TransportDevice> {
    library: TrackRegistry,
    playlists: PlaylistStore,
    filter: ViewFilter,
    selected: Option<PlaylistId>,
    cursor: Cursor,
    volume_percent: u8,
    policy: SequenceChangePolicy,
    transport: T,
    store: Box<dyn StateStore>,
    rng: StdRng,
    last_request: u64,
}

impl<T: TransportDevice> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            library: TrackRegistry::new(),
            playlists: PlaylistStore::new(),
            filter: ViewFilter::default(),
            selected: None,
            cursor: Cursor::default(),
            volume_percent: 100,
            policy: SequenceChangePolicy::default(),
            transport,
            store: Box::new(NullStore),
            rng: StdRng::from_os_rng(),
            last_request: 0,
        }
    }

    pub fn with_policy(mut self, policy: SequenceChangePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_store(mut self, store: impl StateStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    // --- snapshots -------------------------------------------------------

    pub fn library(&self) -> &TrackRegistry {
        &self.library
    }

    /// The library as the filter shows it, in library order.
    pub fn library_view(&self) -> Vec<&Track> {
        self.library
            .tracks()
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// The selected playlist's tracks, or the filtered library when no
    /// playlist is selected.
    pub fn active_sequence(&self) -> Vec<TrackId> {
        match self.selected_playlist() {
            Some(playlist) => playlist.tracks().to_vec(),
            None => self.filter.apply(self.library.tracks()),
        }
    }

    pub fn active_tracks(&self) -> Vec<&Track> {
        self.active_sequence()
            .into_iter()
            .filter_map(|id| self.library.find(id))
            .collect()
    }

    pub fn playlists(&self) -> &[Playlist] {
        self.playlists.all()
    }

    pub fn selected_playlist_id(&self) -> Option<PlaylistId> {
        self.selected
    }

    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.selected.and_then(|id| self.playlists.find(id))
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The cursor's position in the active sequence.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.index_in(&self.active_sequence())
    }

    pub fn now_playing(&self) -> Option<NowPlaying<'_>> {
        let track = self.library.find(self.cursor.loaded_track()?)?;
        Some(NowPlaying {
            track,
            index: self.current_index(),
            state: self.cursor.state(),
            position: self.cursor.position(),
            duration: self.cursor.duration().or(track.duration),
        })
    }

    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.library.find(id)
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }

    pub fn policy(&self) -> SequenceChangePolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // --- library ---------------------------------------------------------

    pub fn import(&mut self, files: impl IntoIterator<Item = RawFile>) -> ImportReport {
        let report = self.library.import(files);
        if !report.imported.is_empty() {
            self.persist();
        }
        report
    }

    /// Walk `dir` and import whatever it holds.
    pub fn import_dir(&mut self, dir: &Path, settings: &LibrarySettings) -> ImportReport {
        info!(dir = %dir.display(), "importing directory");
        self.import(scan(dir, settings))
    }

    /// Remove a track from the library and from every playlist.
    ///
    /// If it is the loaded (or loading) track, playback stops first.
    pub fn remove_track(&mut self, id: TrackId) -> Result<()> {
        if !self.library.contains(id) {
            return Err(Error::TrackNotFound(id));
        }
        if self.cursor.track() == Some(id) || self.cursor.loaded_track() == Some(id) {
            self.stop();
        }
        let removed = self.library.remove(id);
        let playlists = self.playlists.remove_track_everywhere(id);
        info!(
            track = %id,
            name = removed.as_ref().map_or("", |t| t.name.as_str()),
            playlists,
            "track removed"
        );
        self.reconcile_cursor();
        self.persist();
        Ok(())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.set_search(search);
        self.reconcile_cursor();
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.filter.set_genre(genre);
        self.reconcile_cursor();
    }

    pub fn clear_filter(&mut self) {
        self.filter = ViewFilter::default();
        self.reconcile_cursor();
    }

    // --- playlists -------------------------------------------------------

    pub fn create_playlist(&mut self, name: &str) -> Option<PlaylistId> {
        let id = self.playlists.create(name)?;
        self.persist();
        Some(id)
    }

    /// Add a library track to a playlist. `Ok(false)` if it already was a member.
    pub fn add_to_playlist(&mut self, playlist: PlaylistId, track: TrackId) -> Result<bool> {
        if self.playlists.is_empty() {
            return Err(Error::NoPlaylistsAvailable);
        }
        if !self.library.contains(track) {
            return Err(Error::TrackNotFound(track));
        }
        let added = self.playlists.add_track(playlist, track)?;
        if added {
            debug!(%playlist, %track, "track added to playlist");
            self.persist();
        }
        Ok(added)
    }

    pub fn delete_playlist(&mut self, id: PlaylistId) -> Result<()> {
        self.playlists.delete(id)?;
        if self.selected == Some(id) {
            self.selected = None;
            self.reconcile_cursor();
        }
        self.persist();
        Ok(())
    }

    /// Make `playlist` the active sequence; `None` goes back to the library.
    pub fn select_playlist(&mut self, playlist: Option<PlaylistId>) -> Result<()> {
        if let Some(id) = playlist {
            if self.playlists.find(id).is_none() {
                return Err(Error::PlaylistNotFound(id));
            }
        }
        if self.selected == playlist {
            return Ok(());
        }
        self.selected = playlist;
        self.reconcile_cursor();
        Ok(())
    }

    // --- internals -------------------------------------------------------

    fn issue_request(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    /// Re-resolve the cursor after the active sequence changed.
    fn reconcile_cursor(&mut self) {
        let Some(track) = self.cursor.track() else {
            return;
        };
        if self.active_sequence().contains(&track) {
            return;
        }
        match self.policy {
            SequenceChangePolicy::Stop => {
                info!(%track, "current track left the active sequence, stopping");
                self.stop();
            }
            SequenceChangePolicy::Continue => {
                debug!(%track, "current track left the active sequence, playing untracked");
            }
        }
    }

    fn persist(&mut self) {
        let state = self.persisted_state();
        if let Err(e) = self.store.save(&state) {
            warn!(error = %e, "failed to save state");
        }
    }
}
