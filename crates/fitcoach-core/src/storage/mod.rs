mod config;
pub mod database;
pub mod preferences;

pub use config::{ApiConfig, AudioBackend, AudioConfig, Config, ContactConfig, TimerConfig};
pub use database::{Database, KeyValueStore, MemoryStore};
pub use preferences::{fullscreen_key, FullscreenState, Preferences, AUDIO_ENABLED_KEY};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/fitcoach[-dev]/` based on FITCOACH_ENV.
///
/// Set FITCOACH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FITCOACH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fitcoach-dev")
    } else {
        base_dir.join("fitcoach")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
