//! Search windows and their derived identity.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Identity of a monitored window.
///
/// Derived from the departure and return dates only, formatted as
/// `YYYY-MM-DD:YYYY-MM-DD`. Two windows with the same dates but different
/// routes share a key; the later registration wins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowKey(String);

impl WindowKey {
    /// Build the key for a departure/return date pair.
    #[must_use]
    pub fn from_dates(departure_date: NaiveDate, return_date: NaiveDate) -> Self {
        Self(format!("{departure_date}:{return_date}"))
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WindowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Fallback values applied when a window leaves optional fields unset.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefaults {
    pub preferred_stop: String,
    pub max_layover_hours: f64,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            preferred_stop: "MAD".into(),
            max_layover_hours: 5.0,
        }
    }
}

/// One monitored round-trip request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    /// IATA code of the departure airport.
    pub origin: String,
    /// IATA code of the arrival airport.
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Connection airport the traveller would like to pass through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_layover_hours: Option<f64>,
}

impl SearchWindow {
    /// Create a validated window without stop preferences.
    pub fn try_new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
        return_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        let window = Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date,
            preferred_stop: None,
            max_layover_hours: None,
        };
        window.validate()?;
        Ok(window)
    }

    /// Set the preferred connection airport.
    #[must_use]
    pub fn with_preferred_stop(mut self, stop: impl Into<String>) -> Self {
        self.preferred_stop = Some(stop.into());
        self
    }

    /// Set the maximum acceptable layover.
    #[must_use]
    pub fn with_max_layover_hours(mut self, hours: f64) -> Self {
        self.max_layover_hours = Some(hours);
        self
    }

    /// Check the window's invariants.
    ///
    /// Windows deserialized from config files or HTTP bodies bypass
    /// [`SearchWindow::try_new`], so callers validate them explicitly.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin.trim().is_empty() {
            return Err(DomainError::EmptyCode { field: "origin" });
        }
        if self.destination.trim().is_empty() {
            return Err(DomainError::EmptyCode {
                field: "destination",
            });
        }
        if self.return_date <= self.departure_date {
            return Err(DomainError::ReturnNotAfterDeparture {
                departure_date: self.departure_date,
                return_date: self.return_date,
            });
        }
        if let Some(hours) = self.max_layover_hours {
            if hours.is_nan() || hours <= 0.0 {
                return Err(DomainError::InvalidLayover { hours });
            }
        }
        Ok(())
    }

    /// The window's identity.
    #[must_use]
    pub fn key(&self) -> WindowKey {
        WindowKey::from_dates(self.departure_date, self.return_date)
    }

    /// Route label such as `AGP->UIO`.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{}->{}", self.origin, self.destination)
    }

    /// Number of days between departure and return.
    #[must_use]
    pub fn trip_days(&self) -> i64 {
        (self.return_date - self.departure_date).num_days()
    }

    /// Copy of this window with the preferred stop uppercased and missing
    /// optional fields filled from `defaults`.
    #[must_use]
    pub fn normalized(&self, defaults: &WindowDefaults) -> Self {
        let preferred_stop = self
            .preferred_stop
            .as_deref()
            .map(str::trim)
            .filter(|stop| !stop.is_empty())
            .unwrap_or(&defaults.preferred_stop)
            .to_uppercase();

        Self {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            departure_date: self.departure_date,
            return_date: self.return_date,
            preferred_stop: Some(preferred_stop),
            max_layover_hours: Some(self.max_layover_hours.unwrap_or(defaults.max_layover_hours)),
        }
    }
}
