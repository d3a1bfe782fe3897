//! User-defined playlists referencing library tracks by id.

mod model;
mod store;

pub use model::{Playlist, PlaylistId};
pub use store::PlaylistStore;

#[cfg(test)]
mod tests;
