//! Per-window health records.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Lifecycle tag of a monitored window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTag {
    /// Registered but not yet checked.
    Pending,
    /// A provider query is in flight.
    Running,
    /// Last query produced at least one offer.
    Ok,
    /// Last query succeeded with zero offers.
    Empty,
    /// Last query failed.
    Error,
}

impl StatusTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Ok => "ok",
            Self::Empty => "empty",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest status of one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorStatus {
    pub status: StatusTag,
    pub detail: String,
    /// When the window was last checked; `None` until the first check.
    pub checked_at: Option<DateTime<FixedOffset>>,
}

impl MonitorStatus {
    /// Status of a window that has never been checked.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: StatusTag::Pending,
            detail: "waiting for first check".into(),
            checked_at: None,
        }
    }
}
