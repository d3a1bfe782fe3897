//! The media library: imported tracks, the import boundary and the view filter.

mod display;
mod filter;
mod model;
mod registry;
mod scan;

pub use display::{display_from_fields, format_mss};
pub use filter::{GenreFilter, ViewFilter};
pub use model::*;
pub use registry::{ImportReport, TrackRegistry};
pub use scan::scan;

#[cfg(test)]
mod tests;
