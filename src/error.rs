//! Error types for medley.
//!
//! Every failure the session can report is non-fatal: the event loop logs it
//! and shows a notice, then keeps running.

use thiserror::Error;

use crate::library::TrackId;
use crate::playlist::PlaylistId;

#[derive(Error, Debug)]
pub enum Error {
    /// Add-to-playlist was attempted before any playlist exists.
    #[error("no playlists available, create a playlist first")]
    NoPlaylistsAvailable,

    /// A track id that is no longer (or never was) in the library.
    #[error("track not found: {0}")]
    TrackNotFound(TrackId),

    /// A playlist id that is no longer (or never was) in the store.
    #[error("playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// The output device refused to start playback.
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// The output device is unavailable or stopped responding.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
