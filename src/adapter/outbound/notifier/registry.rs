//! Fan-out over several notifiers.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::PriceAlert;
use crate::port::{Notifier, NotifyError};

/// Delivers each alert to every registered notifier.
///
/// Every notifier is attempted even when an earlier one fails; the first
/// failure is returned.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// Names of the registered notifiers, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }
}

#[async_trait]
impl Notifier for NotifierRegistry {
    async fn deliver(&self, alert: &PriceAlert) -> Result<(), NotifyError> {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.deliver(alert).await {
                warn!(notifier = notifier.name(), error = %e, "Notifier failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn name(&self) -> &'static str {
        "registry"
    }
}
