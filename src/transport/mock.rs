//! A device that records commands instead of playing anything.

use std::time::Duration;

use crate::library::Locator;

use super::types::{PlayRequest, RequestId, TransportDevice};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    LoadAndPlay { request: RequestId, locator: Locator },
    Pause,
    Resume,
    SetCurrentTime(Duration),
    SetVolume(f32),
    Unload,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub(crate) commands: Vec<Command>,
}

impl RecordingTransport {
    /// The most recent `load_and_play` request.
    pub(crate) fn last_request(&self) -> Option<RequestId> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::LoadAndPlay { request, .. } => Some(*request),
            _ => None,
        })
    }

    pub(crate) fn last(&self) -> Option<&Command> {
        self.commands.last()
    }

    pub(crate) fn clear(&mut self) {
        self.commands.clear();
    }
}

impl TransportDevice for RecordingTransport {
    fn load_and_play(&mut self, request: PlayRequest) {
        self.commands.push(Command::LoadAndPlay {
            request: request.id,
            locator: request.locator,
        });
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn resume(&mut self) {
        self.commands.push(Command::Resume);
    }

    fn set_current_time(&mut self, position: Duration) {
        self.commands.push(Command::SetCurrentTime(position));
    }

    fn set_volume(&mut self, fraction: f32) {
        self.commands.push(Command::SetVolume(fraction));
    }

    fn unload(&mut self) {
        self.commands.push(Command::Unload);
    }
}
