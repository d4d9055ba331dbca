//! Monitor cycle configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::MonitorSettings;
use crate::domain::WindowDefaults;

/// `[monitor]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Minutes between passes.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    /// Alert when the best price is at or below this value.
    #[serde(default = "default_price_threshold")]
    pub price_threshold: Decimal,
    /// IANA zone used for timestamps. Unknown zones fall back to UTC.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_preferred_stop")]
    pub default_preferred_stop: String,
    #[serde(default = "default_max_layover_hours")]
    pub default_max_layover_hours: f64,
    /// Run the first pass at startup instead of after one interval.
    #[serde(default = "default_run_on_start")]
    pub run_on_start: bool,
}

const fn default_interval_minutes() -> u64 {
    360
}

fn default_price_threshold() -> Decimal {
    Decimal::from(1000)
}

fn default_timezone() -> String {
    "Europe/Madrid".into()
}

fn default_preferred_stop() -> String {
    "MAD".into()
}

const fn default_max_layover_hours() -> f64 {
    5.0
}

const fn default_run_on_start() -> bool {
    true
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            price_threshold: default_price_threshold(),
            timezone: default_timezone(),
            default_preferred_stop: default_preferred_stop(),
            default_max_layover_hours: default_max_layover_hours(),
            run_on_start: default_run_on_start(),
        }
    }
}

impl MonitorConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    #[must_use]
    pub fn window_defaults(&self) -> WindowDefaults {
        WindowDefaults {
            preferred_stop: self.default_preferred_stop.trim().to_uppercase(),
            max_layover_hours: self.default_max_layover_hours,
        }
    }

    /// Settings consumed by [`crate::application::Monitor`].
    #[must_use]
    pub fn settings(&self) -> MonitorSettings {
        MonitorSettings {
            interval: self.interval(),
            threshold: self.price_threshold,
            defaults: self.window_defaults(),
            run_on_start: self.run_on_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_saturates_instead_of_overflowing() {
        let config = MonitorConfig {
            interval_minutes: u64::MAX,
            ..MonitorConfig::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(u64::MAX));
    }
}
