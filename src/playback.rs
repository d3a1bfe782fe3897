//! Playback cursor and transport modes.
//!
//! The cursor remembers *which track* is current, never where it sits: the
//! index is resolved against whatever the active sequence is at read time.

mod cursor;
mod types;

pub use cursor::{Cursor, next_index, previous_index};
pub use types::*;

#[cfg(test)]
mod tests;
