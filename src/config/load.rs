use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::error::Error;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `MEDLEY__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MEDLEY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), Error> {
        if self.audio.tick_ms == 0 {
            return Err(Error::Config("audio.tick_ms must be >= 1".to_string()));
        }
        if self.audio.volume_percent > 100 {
            return Err(Error::Config(
                "audio.volume_percent must be <= 100".to_string(),
            ));
        }
        if self.controls.seek_step_percent == 0 || self.controls.seek_step_percent > 100 {
            return Err(Error::Config(
                "controls.seek_step_percent must be within 1..=100".to_string(),
            ));
        }
        if self.controls.volume_step_percent == 0 {
            return Err(Error::Config(
                "controls.volume_step_percent must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `MEDLEY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MEDLEY_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/medley/config.toml`
/// or `~/.config/medley/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("medley").join("config.toml"))
}
