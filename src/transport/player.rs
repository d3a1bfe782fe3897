use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AudioSettings;

use super::thread::{DeviceCmd, spawn_audio_thread};
use super::types::{PlayRequest, TransportDevice, TransportEvent};

/// `rodio`-backed output device running on its own audio thread.
pub struct RodioTransport {
    tx: Sender<DeviceCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioTransport {
    /// Start the audio thread. The returned receiver carries the device's events.
    pub fn spawn(audio_settings: AudioSettings) -> (Self, Receiver<TransportEvent>) {
        let (tx, rx) = mpsc::channel::<DeviceCmd>();
        let (event_tx, event_rx) = mpsc::channel::<TransportEvent>();

        let audio_handle = spawn_audio_thread(rx, event_tx, audio_settings);

        let transport = Self {
            tx,
            join: Mutex::new(Some(audio_handle)),
        };
        (transport, event_rx)
    }

    fn send(&self, cmd: DeviceCmd) {
        debug!(?cmd, "transport command");
        if self.tx.send(cmd).is_err() {
            warn!("audio thread is gone, command dropped");
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(DeviceCmd::Quit {
            fade_out_ms: u64::try_from(fade_out.as_millis()).unwrap_or(u64::MAX),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl TransportDevice for RodioTransport {
    fn load_and_play(&mut self, request: PlayRequest) {
        self.send(DeviceCmd::LoadAndPlay(request));
    }

    fn pause(&mut self) {
        self.send(DeviceCmd::Pause);
    }

    fn resume(&mut self) {
        self.send(DeviceCmd::Resume);
    }

    fn set_current_time(&mut self, position: Duration) {
        self.send(DeviceCmd::Seek(position));
    }

    fn set_volume(&mut self, fraction: f32) {
        self.send(DeviceCmd::SetVolume(fraction));
    }

    fn unload(&mut self) {
        self.send(DeviceCmd::Unload);
    }
}
