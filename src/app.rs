//! Application module: the front-end state that lives next to the session.
//!
//! The `App` model in `app::model` only holds what the terminal needs:
//! which pane has focus, which rows are selected, and whether a prompt or
//! popup is open. Library and playback state stay in the session.

mod model;

pub use model::*;
