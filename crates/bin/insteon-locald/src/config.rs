//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `insteon.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use insteon_local_adapter_virtual::VirtualHubConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where persisted device names live.
    pub storage: StorageConfig,
    /// State polling settings.
    pub polling: PollingConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Devices linked to the simulated hub.
    pub hub: VirtualHubConfig,
}

/// Name store location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `insteon_local_switch.conf`.
    pub config_dir: PathBuf,
}

/// Polling loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between two refresh rounds.
    pub interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `insteon.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("insteon.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("INSTEON_CONFIG_DIR") {
            self.storage.config_dir = PathBuf::from(val);
        }
        if let Some(secs) = std::env::var("INSTEON_POLL_SECS")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            self.polling.interval_secs = secs;
        }
        if let Ok(val) = std::env::var("INSTEON_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "polling interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.polling.interval_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("."),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "insteon_locald=info,insteon_local=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
