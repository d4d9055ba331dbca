//! Canonical test configurations.

use rust_decimal::Decimal;
use std::time::Duration;

use crate::application::MonitorSettings;
use crate::domain::WindowDefaults;
use crate::infrastructure::config::Config;

/// Monitor settings with threshold 1000, a long interval and no initial
/// pass, so tests drive passes explicitly.
pub fn monitor_settings() -> MonitorSettings {
    MonitorSettings {
        interval: Duration::from_secs(3600),
        threshold: Decimal::from(1000),
        defaults: WindowDefaults::default(),
        run_on_start: false,
    }
}

/// Default config listening on an ephemeral local port.
///
/// # Panics
///
/// Panics if the built-in defaults fail validation.
pub fn app_config() -> Config {
    Config::parse_toml("[server]\nlisten_address = \"127.0.0.1:0\"\n").expect("valid test config")
}
