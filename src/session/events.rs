use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::transport::{TransportDevice, TransportEvent};

use super::Session;

impl<T: TransportDevice> Session<T> {
    /// Feed one device event into the session.
    ///
    /// Events for superseded requests are dropped. A rejection of the live
    /// request comes back as [`Error::PlaybackRejected`] so the front end can
    /// report it; the session itself is already consistent.
    pub fn handle_event(&mut self, event: TransportEvent) -> Result<()> {
        match event {
            TransportEvent::PlayStarted(request) => {
                if !self.cursor.is_pending_request(request) {
                    debug!(%request, "ignoring stale play confirmation");
                    return Ok(());
                }
                let duration = self
                    .cursor
                    .track_for(request)
                    .and_then(|id| self.library.find(id))
                    .and_then(|t| t.duration);
                if let Some(track) = self.cursor.confirm(request, duration) {
                    info!(%request, %track, "playback started");
                }
                Ok(())
            }

            TransportEvent::PlayRejected { request, reason } => {
                if !self.cursor.reject(request) {
                    debug!(%request, %reason, "ignoring stale rejection");
                    return Ok(());
                }
                warn!(%request, %reason, "playback rejected");
                // The old track ran out while this request was in flight.
                if self.cursor.take_deferred_end() && self.cursor.is_playing() {
                    if let Some(duration) = self.cursor.duration() {
                        self.cursor.set_position(duration);
                    }
                    self.on_track_ended()?;
                }
                Err(Error::PlaybackRejected(reason))
            }

            TransportEvent::MetadataLoaded { request, duration } => {
                let Some(track) = self.cursor.track_for(request) else {
                    debug!(%request, "ignoring stale metadata");
                    return Ok(());
                };
                self.library.set_duration(track, duration);
                if self.cursor.is_loaded_request(request) {
                    self.cursor.set_duration(duration);
                }
                Ok(())
            }

            TransportEvent::TimeUpdate { request, position } => {
                if self.cursor.is_loaded_request(request) {
                    self.cursor.set_position(position);
                }
                Ok(())
            }

            TransportEvent::Ended(request) => {
                if !self.cursor.is_loaded_request(request) || !self.cursor.is_playing() {
                    debug!(%request, "ignoring stale end of track");
                    return Ok(());
                }
                if self.cursor.is_pending() {
                    // Another track is on its way; settle once it is answered.
                    debug!(%request, "end of track deferred");
                    self.cursor.defer_end();
                    return Ok(());
                }
                if let Some(duration) = self.cursor.duration() {
                    self.cursor.set_position(duration);
                }
                self.on_track_ended()
            }
        }
    }
}
