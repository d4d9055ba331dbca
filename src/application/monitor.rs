//! Monitor cycle.
//!
//! One long-lived task polls every registered window in sequence, records
//! the result into [`LiveState`], evaluates the alert decision, then waits
//! for the configured interval or a shutdown signal. On-demand searches run
//! the same per-window body through [`Monitor::search_now`].

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::shutdown;
use super::state::LiveState;
use crate::domain::{alert, cheapest, Offer, SearchWindow, StatusTag, WindowDefaults, WindowKey};
use crate::port::{FailureKind, FlightProvider, Notifier, ProviderError};

/// Tunables for the monitor cycle.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Wait between passes.
    pub interval: Duration,
    /// Price at or below which an alert is raised.
    pub threshold: Decimal,
    pub defaults: WindowDefaults,
    /// Run the first pass immediately instead of after one interval.
    pub run_on_start: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(360 * 60),
            threshold: Decimal::from(1000),
            defaults: WindowDefaults::default(),
            run_on_start: true,
        }
    }
}

/// Result of checking one window.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// At least one offer; the cheapest was recorded.
    Priced {
        offers: Vec<Offer>,
        best: Offer,
        alerted: bool,
    },
    /// The provider answered with no offers.
    Empty,
    /// The provider failed.
    Failed(ProviderError),
}

#[derive(Debug, Clone)]
pub struct WindowReport {
    pub key: WindowKey,
    pub outcome: Outcome,
}

/// Counters for one full pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub windows: usize,
    pub priced: usize,
    pub empty: usize,
    pub failed: usize,
    pub alerts: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: &Outcome) {
        self.windows += 1;
        match outcome {
            Outcome::Priced { alerted, .. } => {
                self.priced += 1;
                if *alerted {
                    self.alerts += 1;
                }
            }
            Outcome::Empty => self.empty += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

/// The polling engine. Sole writer of offers and statuses.
pub struct Monitor {
    state: Arc<LiveState>,
    provider: Arc<dyn FlightProvider>,
    notifier: Arc<dyn Notifier>,
    settings: MonitorSettings,
}

impl Monitor {
    pub fn new(
        state: Arc<LiveState>,
        provider: Arc<dyn FlightProvider>,
        notifier: Arc<dyn Notifier>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            state,
            provider,
            notifier,
            settings,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<LiveState> {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    #[must_use]
    pub fn provider_ready(&self) -> bool {
        self.provider.is_ready()
    }

    /// Poll every registered window once, sequentially.
    pub async fn run_pass(&self) -> PassSummary {
        let windows = self.state.windows();
        let mut summary = PassSummary::default();

        for (_, window) in windows {
            let report = self.check_window(&window).await;
            summary.record(&report.outcome);
        }

        info!(
            windows = summary.windows,
            priced = summary.priced,
            empty = summary.empty,
            failed = summary.failed,
            alerts = summary.alerts,
            "Monitor pass complete"
        );
        summary
    }

    /// Check one window: query the provider, record the result, and
    /// deliver an alert when the best price is at or below the threshold.
    pub async fn check_window(&self, window: &SearchWindow) -> WindowReport {
        let window = window.normalized(&self.settings.defaults);
        let key = window.key();

        self.state
            .record_status(&key, StatusTag::Running, "querying provider");

        let offers = match self.provider.search(&window).await {
            Ok(offers) => offers,
            Err(e) => {
                warn!(
                    key = %key,
                    provider = %e.provider,
                    kind = %e.kind,
                    error = %e.message,
                    "Provider search failed"
                );
                self.state
                    .record_status(&key, StatusTag::Error, failure_detail(&e, self.settings.interval));
                return WindowReport {
                    key,
                    outcome: Outcome::Failed(e),
                };
            }
        };

        let Some(best) = cheapest(&offers).cloned() else {
            info!(
                key = %key,
                route = %window.route(),
                "No offers returned"
            );
            self.state.record_status(
                &key,
                StatusTag::Empty,
                format!(
                    "no offers for {} {} - {}",
                    window.route(),
                    window.departure_date,
                    window.return_date
                ),
            );
            return WindowReport {
                key,
                outcome: Outcome::Empty,
            };
        };

        self.state.record_offer(&key, best.clone());
        self.state.record_status(
            &key,
            StatusTag::Ok,
            format!(
                "{} offers, best {:.2} {}",
                offers.len(),
                best.total_price,
                best.currency
            ),
        );

        let alerted = self.maybe_alert(&window, &best).await;

        WindowReport {
            key,
            outcome: Outcome::Priced {
                offers,
                best,
                alerted,
            },
        }
    }

    /// Run one search immediately and register the window for future passes.
    ///
    /// Returns the provider's full offer list.
    pub async fn search_now(&self, window: SearchWindow) -> Result<Vec<Offer>, ProviderError> {
        let key = self.state.register(window.clone());
        debug!(key = %key, "On-demand search");

        match self.check_window(&window).await.outcome {
            Outcome::Priced { offers, .. } => Ok(offers),
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Failed(e) => Err(e),
        }
    }

    async fn maybe_alert(&self, window: &SearchWindow, best: &Offer) -> bool {
        let Some(price_alert) = alert::evaluate(window, best, self.settings.threshold) else {
            info!(
                key = %window.key(),
                price = %best.total_price,
                threshold = %self.settings.threshold,
                "Best price above threshold"
            );
            return false;
        };

        if let Err(e) = self.notifier.deliver(&price_alert).await {
            error!(
                key = %window.key(),
                notifier = self.notifier.name(),
                error = %e,
                "Alert delivery failed"
            );
        }
        true
    }

    /// Poll until shutdown is requested.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            windows = self.state.windows().len(),
            interval_secs = self.settings.interval.as_secs(),
            provider = self.provider.name(),
            "Price monitor started"
        );

        let mut poll_now = self.settings.run_on_start;
        loop {
            if poll_now {
                tokio::select! {
                    _ = shutdown::requested(&mut shutdown) => break,
                    _ = self.run_pass() => {}
                }
            }
            poll_now = true;

            tokio::select! {
                _ = shutdown::requested(&mut shutdown) => break,
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        info!("Price monitor stopped");
    }

    /// Spawn [`Monitor::run`] on the runtime.
    pub fn spawn(self: Arc<Self>) -> MonitorHandle {
        let (shutdown_tx, shutdown_rx) = shutdown::channel();
        let task = tokio::spawn(async move { self.run(shutdown_rx).await });
        MonitorHandle { shutdown_tx, task }
    }
}

/// Handle to the background monitor task.
pub struct MonitorHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Signal the task to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        match self.task.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => debug!("Monitor task cancelled"),
            Err(e) => error!(error = %e, "Monitor task panicked"),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Operator-facing description of a provider failure.
#[must_use]
pub fn failure_detail(error: &ProviderError, interval: Duration) -> String {
    match error.kind {
        FailureKind::RateLimited => format!(
            "rate_limited: {} throttled the request; retrying on the next cycle (every {})",
            error.provider,
            describe_interval(interval)
        ),
        FailureKind::Unauthorized => format!(
            "unauthorized: {} rejected the credentials; check the configured API credentials ({})",
            error.provider, error.message
        ),
        FailureKind::TransportError => format!("transport_error: {}", error.message),
    }
}

fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{secs} seconds")
    }
}
