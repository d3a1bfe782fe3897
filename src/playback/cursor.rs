use std::time::Duration;

use rand::Rng;

use crate::library::TrackId;
use crate::transport::RequestId;

use super::types::{PlaybackState, RepeatMode};

/// The playback cursor.
///
/// `loaded` is the track the device confirmed; `pending` is a request that
/// has been sent but not yet answered. A newer request replaces an older
/// pending one, so only the last command can ever be confirmed.
///
/// While a request is in flight the cursor also remembers two things the
/// answer must not undo: a pause issued before the device confirmed, and
/// the loaded track running out before it was replaced.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    loaded: Option<(RequestId, TrackId)>,
    pending: Option<(RequestId, TrackId)>,
    is_playing: bool,
    position: Duration,
    duration: Option<Duration>,
    hold_paused: bool,
    deferred_end: bool,
    pub is_shuffling: bool,
    pub repeat_mode: RepeatMode,
}

impl Cursor {
    /// The track the cursor points at: the pending one if a play is in
    /// flight, otherwise the loaded one.
    pub fn track(&self) -> Option<TrackId> {
        self.pending.or(self.loaded).map(|(_, t)| t)
    }

    /// The track whose source the device currently holds.
    pub fn loaded_track(&self) -> Option<TrackId> {
        self.loaded.map(|(_, t)| t)
    }

    pub fn source_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True when the in-flight request should come up paused.
    pub fn is_held_paused(&self) -> bool {
        self.pending.is_some() && self.hold_paused
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn state(&self) -> PlaybackState {
        match (self.loaded, self.is_playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Where the cursor's track sits in `sequence`, if it is a member.
    pub fn index_in(&self, sequence: &[TrackId]) -> Option<usize> {
        let track = self.track()?;
        sequence.iter().position(|&t| t == track)
    }

    pub(crate) fn begin(&mut self, request: RequestId, track: TrackId) {
        self.pending = Some((request, track));
        self.hold_paused = false;
    }

    pub(crate) fn set_hold_paused(&mut self, hold: bool) {
        self.hold_paused = hold;
    }

    /// The loaded track ended while a request was in flight.
    pub(crate) fn defer_end(&mut self) {
        self.deferred_end = true;
    }

    pub(crate) fn take_deferred_end(&mut self) -> bool {
        std::mem::take(&mut self.deferred_end)
    }

    /// Promote the pending request to loaded. Returns the track, or `None`
    /// if `request` is not the one in flight.
    pub(crate) fn confirm(
        &mut self,
        request: RequestId,
        duration: Option<Duration>,
    ) -> Option<TrackId> {
        match self.pending {
            Some((pending, track)) if pending == request => {
                self.pending = None;
                self.loaded = Some((request, track));
                self.is_playing = !std::mem::take(&mut self.hold_paused);
                self.deferred_end = false;
                self.position = Duration::ZERO;
                self.duration = duration;
                Some(track)
            }
            _ => None,
        }
    }

    /// Drop the pending request if it is `request`. The loaded track, if
    /// any, is untouched; a deferred end stays for the caller to take.
    pub(crate) fn reject(&mut self, request: RequestId) -> bool {
        match self.pending {
            Some((pending, _)) if pending == request => {
                self.pending = None;
                self.hold_paused = false;
                true
            }
            _ => false,
        }
    }

    /// The track a device event for `request` refers to, if it is still live.
    pub(crate) fn track_for(&self, request: RequestId) -> Option<TrackId> {
        [self.pending, self.loaded]
            .into_iter()
            .flatten()
            .find(|&(r, _)| r == request)
            .map(|(_, t)| t)
    }

    pub(crate) fn is_loaded_request(&self, request: RequestId) -> bool {
        self.loaded.is_some_and(|(r, _)| r == request)
    }

    pub(crate) fn is_pending_request(&self, request: RequestId) -> bool {
        self.pending.is_some_and(|(r, _)| r == request)
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    /// Forget the loaded and pending tracks. Modes survive.
    pub(crate) fn clear(&mut self) {
        self.loaded = None;
        self.pending = None;
        self.is_playing = false;
        self.position = Duration::ZERO;
        self.duration = None;
        self.hold_paused = false;
        self.deferred_end = false;
    }
}

/// The index `next` moves to in a sequence of `len` tracks.
///
/// Shuffle picks uniformly from the whole sequence, the current index
/// included. An untracked cursor (`current == None`) starts at 0.
pub fn next_index<R: Rng + ?Sized>(
    current: Option<usize>,
    len: usize,
    shuffle: bool,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if shuffle {
        return Some(rng.random_range(0..len));
    }
    Some(current.map_or(0, |i| (i + 1) % len))
}

/// The index `previous` moves to. Ignores shuffle; untracked goes to the end.
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map_or(len - 1, |i| (i + len - 1) % len))
}
