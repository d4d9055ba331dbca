//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; provider credentials
//! only ever come from environment variables.
//!
//! # Example
//!
//! ```no_run
//! use farewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;
use super::notifier::NotifierConfig;
use super::provider::{ProviderConfig, ProviderKind};
use super::server::ServerConfig;
use super::windows::default_windows;
use crate::domain::SearchWindow;
use crate::error::{ConfigError, Result};

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Longest accepted monitor interval: one week.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Target windows. Falls back to the built-in AGP to UIO set.
    #[serde(default = "default_windows")]
    pub windows: Vec<SearchWindow>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            monitor: MonitorConfig::default(),
            provider: ProviderConfig::default(),
            notifier: NotifierConfig::default(),
            server: ServerConfig::default(),
            windows: default_windows(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads Amadeus credentials from `AMADEUS_CLIENT_ID` and
    /// `AMADEUS_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.provider.amadeus.load_credentials_from_env();

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when given, else `config.toml` if present, else defaults.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Self::parse_toml(""),
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.monitor.interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_minutes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.monitor.interval_minutes > MAX_INTERVAL_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "interval_minutes",
                reason: format!("must be at most {MAX_INTERVAL_MINUTES}"),
            }
            .into());
        }
        if self.monitor.price_threshold < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "price_threshold",
                reason: "must not be negative".to_string(),
            }
            .into());
        }
        let layover = self.monitor.default_max_layover_hours;
        if layover.is_nan() || layover <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "default_max_layover_hours",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.monitor.default_preferred_stop.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "default_preferred_stop",
            }
            .into());
        }
        if let Err(e) = self.server.listen_address.parse::<SocketAddr>() {
            return Err(ConfigError::InvalidValue {
                field: "listen_address",
                reason: e.to_string(),
            }
            .into());
        }
        for window in &self.windows {
            if let Err(e) = window.validate() {
                return Err(ConfigError::InvalidValue {
                    field: "windows",
                    reason: format!("{}: {e}", window.key()),
                }
                .into());
            }
        }
        if self.provider.kind == ProviderKind::Amadeus {
            if self.provider.amadeus.client_id.is_none() {
                return Err(ConfigError::MissingField {
                    field: "AMADEUS_CLIENT_ID",
                }
                .into());
            }
            if self.provider.amadeus.client_secret.is_none() {
                return Err(ConfigError::MissingField {
                    field: "AMADEUS_CLIENT_SECRET",
                }
                .into());
            }
        }
        if self.notifier.telegram.enabled && !cfg!(feature = "telegram") {
            return Err(ConfigError::InvalidValue {
                field: "notifier.telegram.enabled",
                reason: "telegram support requires the telegram feature".to_string(),
            }
            .into());
        }
        if self.windows.is_empty() {
            warn!("No windows configured; the monitor will idle until a search registers one");
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
