use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::library::TrackId;
use crate::playback::{PlaybackState, RepeatMode, next_index, previous_index};
use crate::transport::{PlayRequest, TransportDevice};

use super::Session;

impl<T: TransportDevice> Session<T> {
    /// Load `id` and start playing it.
    ///
    /// The track does not have to be in the active sequence; if it is not,
    /// it plays untracked. Playback counts as started only once the device
    /// confirms this request.
    pub fn play(&mut self, id: TrackId) -> Result<()> {
        let (locator, source) = self
            .library
            .find(id)
            .map(|t| (t.locator.clone(), t.source.clone()))
            .ok_or(Error::TrackNotFound(id))?;
        let request = self.issue_request();
        self.cursor.begin(request, id);
        debug!(%request, track = %id, %locator, "play requested");
        self.transport.load_and_play(PlayRequest {
            id: request,
            locator,
            source,
        });
        Ok(())
    }

    /// Play the selected position of the active sequence.
    pub fn play_index(&mut self, index: usize) -> Result<()> {
        match self.active_sequence().get(index) {
            Some(&id) => self.play(id),
            None => Ok(()),
        }
    }

    /// While a load is in flight the toggle targets the incoming track: the
    /// device applies the pause after the load, so the answer comes up paused.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.cursor.is_pending() {
            let hold = !self.cursor.is_held_paused();
            if hold {
                self.transport.pause();
            } else {
                self.transport.resume();
            }
            self.cursor.set_hold_paused(hold);
            self.cursor.set_playing(!hold);
            debug!(hold, "toggled while loading");
            return Ok(());
        }
        match self.cursor.state() {
            PlaybackState::Stopped => {
                match self.active_sequence().first() {
                    Some(&first) => self.play(first),
                    None => Ok(()),
                }
            }
            PlaybackState::Playing => {
                self.transport.pause();
                self.cursor.set_playing(false);
                Ok(())
            }
            PlaybackState::Paused => {
                self.transport.resume();
                self.cursor.set_playing(true);
                Ok(())
            }
        }
    }

    /// Step back one track, wrapping to the end. Shuffle does not apply.
    pub fn previous(&mut self) -> Result<()> {
        let sequence = self.active_sequence();
        let current = self.cursor.index_in(&sequence);
        match previous_index(current, sequence.len()) {
            Some(i) => self.play(sequence[i]),
            None => Ok(()),
        }
    }

    pub fn next(&mut self) -> Result<()> {
        let sequence = self.active_sequence();
        let current = self.cursor.index_in(&sequence);
        match next_index(current, sequence.len(), self.cursor.is_shuffling, &mut self.rng) {
            Some(i) => self.play(sequence[i]),
            None => Ok(()),
        }
    }

    /// Automatic advancement after the loaded track played to its end.
    pub fn on_track_ended(&mut self) -> Result<()> {
        match self.cursor.repeat_mode {
            RepeatMode::RepeatOne => {
                self.transport.set_current_time(Duration::ZERO);
                self.transport.resume();
                self.cursor.set_position(Duration::ZERO);
                self.cursor.set_playing(true);
                Ok(())
            }
            RepeatMode::RepeatAll => self.next(),
            RepeatMode::Off => {
                let sequence = self.active_sequence();
                let at_end = match self.cursor.index_in(&sequence) {
                    Some(i) => i + 1 == sequence.len(),
                    None => sequence.is_empty(),
                };
                if at_end {
                    info!("end of sequence");
                    self.cursor.set_playing(false);
                    Ok(())
                } else {
                    self.next()
                }
            }
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.cursor.is_shuffling = !self.cursor.is_shuffling;
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.cursor.is_shuffling = on;
    }

    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.cursor.repeat_mode = self.cursor.repeat_mode.cycle();
        self.cursor.repeat_mode
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.cursor.repeat_mode = mode;
    }

    /// Set the output volume, 0 to 100 percent.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.volume_percent = percent;
        self.transport.set_volume(f32::from(percent) / 100.0);
    }

    /// Jump to `fraction` (0.0 to 1.0) of the loaded track.
    ///
    /// Does nothing while the track length is unknown.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() || !self.cursor.source_loaded() {
            return;
        }
        let Some(duration) = self.cursor.duration() else {
            return;
        };
        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.transport.set_current_time(target);
        self.cursor.set_position(target);
    }

    /// Seek relative to the current position by `percent` of the track length.
    pub fn seek_by_percent(&mut self, percent: i32) {
        let Some(duration) = self.cursor.duration().filter(|d| !d.is_zero()) else {
            return;
        };
        let now = self.cursor.position().as_secs_f64() / duration.as_secs_f64();
        self.seek(now + f64::from(percent) / 100.0);
    }

    /// Unload the source and clear the cursor. Modes are kept.
    pub fn stop(&mut self) {
        if self.cursor.source_loaded() || self.cursor.is_pending() {
            self.transport.unload();
        }
        self.cursor.clear();
    }
}
