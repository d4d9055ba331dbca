//! Notifier port for price alerts.
//!
//! Delivery is best-effort. The monitor logs and discards any
//! [`NotifyError`]; a failed alert never rolls back recorded state.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PriceAlert;

/// Alert delivery failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{notifier} failed to deliver alert: {reason}")]
    Delivery {
        notifier: &'static str,
        reason: String,
    },

    #[error("{notifier} delivery queue is closed")]
    ChannelClosed { notifier: &'static str },
}

/// Sink for price alerts.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `deliver` must return promptly; slow transports should queue the
///   alert and hand it to a background worker
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert.
    async fn deliver(&self, alert: &PriceAlert) -> Result<(), NotifyError>;

    /// Notifier name for logs.
    fn name(&self) -> &'static str;
}
