//! medley: a terminal media-library player.
//!
//! The core is [`session::Session`], which owns the track registry, the
//! playlists, the view filter and the playback cursor, and drives one
//! [`transport::TransportDevice`]. The `runtime`, `app` and `ui` modules are
//! the terminal front end around it.

pub mod app;
pub mod config;
pub mod error;
pub mod library;
pub mod playback;
pub mod playlist;
pub mod runtime;
pub mod session;
pub mod transport;
pub mod ui;
