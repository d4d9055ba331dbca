//! Notifier doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::PriceAlert;
use crate::port::{Notifier, NotifyError};

/// Records every delivered alert.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<PriceAlert>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<PriceAlert> {
        self.alerts.lock().expect("alerts lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, alert: &PriceAlert) -> Result<(), NotifyError> {
        self.alerts.lock().expect("alerts lock").push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Fails every delivery and counts the attempts.
#[derive(Clone, Default)]
pub struct FailingNotifier {
    attempts: Arc<AtomicUsize>,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn deliver(&self, _alert: &PriceAlert) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Delivery {
            notifier: "failing",
            reason: "smtp unreachable".into(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
