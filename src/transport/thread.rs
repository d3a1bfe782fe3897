use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;
use crate::library::MediaSource;

use super::clock::PlayClock;
use super::sink::create_sink_at;
use super::types::{PlayRequest, RequestId, TransportEvent};

#[derive(Debug)]
pub(super) enum DeviceCmd {
    LoadAndPlay(PlayRequest),
    Pause,
    Resume,
    Seek(Duration),
    SetVolume(f32),
    Unload,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// The source currently owned by the audio thread.
struct Loaded {
    request: RequestId,
    source: MediaSource,
    sink: Sink,
    total: Option<Duration>,
    clock: PlayClock,
    ended: bool,
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<DeviceCmd>,
    events: Sender<TransportEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!(error = %e, "no audio output device, every play request will be rejected");
                None
            }
        };

        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut volume = f32::from(audio_settings.volume_percent.min(100)) / 100.0;
        let mut loaded: Option<Loaded> = None;

        let emit = |event: TransportEvent| {
            // The receiver only disappears during shutdown.
            let _ = events.send(event);
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    DeviceCmd::LoadAndPlay(request) => {
                        let Some(stream) = stream.as_ref() else {
                            emit(TransportEvent::PlayRejected {
                                request: request.id,
                                reason: "no audio output device".to_string(),
                            });
                            continue;
                        };

                        // Decode first: on failure whatever was playing keeps playing.
                        match create_sink_at(stream, &request.source, Duration::ZERO) {
                            Ok((sink, total)) => {
                                if let Some(old) = loaded.take() {
                                    old.sink.stop();
                                }
                                if let Some(duration) = total {
                                    emit(TransportEvent::MetadataLoaded {
                                        request: request.id,
                                        duration,
                                    });
                                }
                                sink.set_volume(volume);
                                sink.play();
                                let mut clock = PlayClock::paused_at(Duration::ZERO);
                                clock.resume();
                                debug!(request = %request.id, locator = %request.locator, "playback started");
                                loaded = Some(Loaded {
                                    request: request.id,
                                    source: request.source,
                                    sink,
                                    total,
                                    clock,
                                    ended: false,
                                });
                                emit(TransportEvent::PlayStarted(request.id));
                            }
                            Err(reason) => {
                                warn!(request = %request.id, locator = %request.locator, %reason, "cannot play source");
                                emit(TransportEvent::PlayRejected {
                                    request: request.id,
                                    reason,
                                });
                            }
                        }
                    }

                    DeviceCmd::Pause => {
                        if let Some(l) = loaded.as_mut() {
                            l.sink.pause();
                            l.clock.pause();
                        }
                    }

                    DeviceCmd::Resume => {
                        let Some(l) = loaded.as_mut() else {
                            continue;
                        };
                        if l.ended {
                            // The sink is drained: start the source over.
                            let Some(stream) = stream.as_ref() else {
                                continue;
                            };
                            match create_sink_at(stream, &l.source, Duration::ZERO) {
                                Ok((new_sink, total)) => {
                                    l.sink.stop();
                                    new_sink.set_volume(volume);
                                    l.sink = new_sink;
                                    l.total = total.or(l.total);
                                    l.clock.reset_to(Duration::ZERO);
                                    l.ended = false;
                                }
                                Err(reason) => {
                                    warn!(request = %l.request, %reason, "cannot restart source");
                                    continue;
                                }
                            }
                        }
                        l.sink.play();
                        l.clock.resume();
                    }

                    DeviceCmd::Seek(target) => {
                        // Rebuild the current sink and skip into the source.
                        let Some(stream) = stream.as_ref() else {
                            continue;
                        };
                        let Some(l) = loaded.as_mut() else {
                            continue;
                        };
                        match create_sink_at(stream, &l.source, target) {
                            Ok((new_sink, total)) => {
                                l.sink.stop();
                                new_sink.set_volume(volume);
                                if l.clock.is_running() {
                                    new_sink.play();
                                }
                                l.sink = new_sink;
                                l.total = total.or(l.total);
                                l.clock.reset_to(target);
                                l.ended = false;
                                emit(TransportEvent::TimeUpdate {
                                    request: l.request,
                                    position: target,
                                });
                            }
                            Err(reason) => {
                                warn!(request = %l.request, %reason, "seek failed");
                            }
                        }
                    }

                    DeviceCmd::SetVolume(fraction) => {
                        volume = fraction.clamp(0.0, 1.0);
                        if let Some(l) = loaded.as_ref() {
                            l.sink.set_volume(volume);
                        }
                    }

                    DeviceCmd::Unload => {
                        if let Some(l) = loaded.take() {
                            l.sink.stop();
                        }
                    }

                    DeviceCmd::Quit { fade_out_ms } => {
                        if let Some(l) = loaded.take() {
                            // Fade out gently before stopping.
                            if l.clock.is_running() && !l.ended {
                                fade_out_sink(&l.sink, volume, fade_out_ms);
                            }
                            l.sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic position report and end-of-track detection.
                    let Some(l) = loaded.as_mut() else {
                        continue;
                    };
                    if l.ended || !l.clock.is_running() {
                        continue;
                    }
                    if l.sink.empty() {
                        l.ended = true;
                        l.clock.pause();
                        emit(TransportEvent::Ended(l.request));
                    } else {
                        emit(TransportEvent::TimeUpdate {
                            request: l.request,
                            position: l.clock.position_within(l.total),
                        });
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
