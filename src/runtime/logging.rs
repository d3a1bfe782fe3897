use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global subscriber writing to `settings.file`.
///
/// The terminal belongs to the UI, so without a log file nothing is
/// installed and every event is dropped. `RUST_LOG` overrides `settings.level`.
pub fn init(settings: &LoggingSettings) -> anyhow::Result<bool> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("cannot install log subscriber: {e}"))?;
    Ok(true)
}
