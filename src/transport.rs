//! Output device boundary and its `rodio` implementation.

mod clock;
mod player;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use player::RodioTransport;
pub use types::*;

#[cfg(test)]
mod tests;
