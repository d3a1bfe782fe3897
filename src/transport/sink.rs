//! Utilities for creating `rodio` sinks from media sources.
//!
//! The helper here encapsulates opening/decoding a source and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::MediaSource;

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
///
/// Returns the sink and the total length of the source when the decoder knows it.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    source: &MediaSource,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), String> {
    let sink = Sink::connect_new(stream.mixer());
    let total = match source {
        MediaSource::File(path) => {
            let file = File::open(path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            append_decoded(&sink, BufReader::new(file), start_at)?
        }
        MediaSource::Memory(bytes) => {
            append_decoded(&sink, Cursor::new(Arc::clone(bytes)), start_at)?
        }
    };
    sink.pause();
    Ok((sink, total))
}

fn append_decoded<R>(sink: &Sink, reader: R, start_at: Duration) -> Result<Option<Duration>, String>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let decoder = Decoder::new(reader).map_err(|e| format!("failed to decode: {e}"))?;
    let total = decoder.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    Ok(total)
}
