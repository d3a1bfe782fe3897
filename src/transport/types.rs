//! The boundary to the single playback element.
//!
//! Commands go out through [`TransportDevice`]; results and progress come
//! back as [`TransportEvent`]s which the session consumes on its own thread.

use std::fmt;
use std::time::Duration;

use crate::library::{Locator, MediaSource};

/// Correlates a `load_and_play` command with its asynchronous outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub id: RequestId,
    pub locator: Locator,
    pub source: MediaSource,
}

/// Events emitted by the device. Every event names the request it belongs
/// to, so stale events from a superseded track can be told apart.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Playback of the request actually started.
    PlayStarted(RequestId),
    /// The device refused or failed to start the request.
    PlayRejected { request: RequestId, reason: String },
    /// The track length became known.
    MetadataLoaded {
        request: RequestId,
        duration: Duration,
    },
    /// Playback position advanced.
    TimeUpdate {
        request: RequestId,
        position: Duration,
    },
    /// The track played to its end.
    Ended(RequestId),
}

/// Commands understood by an output device.
///
/// Every method returns immediately; `load_and_play` reports its outcome
/// later through a [`TransportEvent`]. The device is the arbiter of
/// "last command wins".
pub trait TransportDevice {
    fn load_and_play(&mut self, request: PlayRequest);
    fn pause(&mut self);
    fn resume(&mut self);
    fn set_current_time(&mut self, position: Duration);
    /// `fraction` is 0.0 (silent) to 1.0 (full).
    fn set_volume(&mut self, fraction: f32);
    /// Drop the loaded source, if any.
    fn unload(&mut self);
}
