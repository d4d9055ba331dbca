//! Notifiers that never leave the process.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::PriceAlert;
use crate::port::{Notifier, NotifyError};

/// Writes alerts to the log at `warn` level.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    recipients: Vec<String>,
}

impl LogNotifier {
    #[must_use]
    pub fn new(recipients: Vec<String>) -> Self {
        Self { recipients }
    }

    #[must_use]
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, alert: &PriceAlert) -> Result<(), NotifyError> {
        warn!(
            key = %alert.window.key(),
            price = %alert.best_price,
            currency = %alert.currency,
            below_threshold = alert.below_threshold,
            recipients = ?self.recipients,
            "Price alert: {}",
            alert.message
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Discards every alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn deliver(&self, _alert: &PriceAlert) -> Result<(), NotifyError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
