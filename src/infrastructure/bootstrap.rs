//! Composition root: builds the live state, provider, notifiers and monitor
//! from configuration.

use std::sync::Arc;

use tracing::info;
#[cfg(feature = "telegram")]
use tracing::warn;

use crate::adapter::outbound::amadeus::AmadeusProvider;
use crate::adapter::outbound::notifier::{LogNotifier, NotifierRegistry};
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};
use crate::adapter::outbound::synthetic::SyntheticProvider;
use crate::application::{LiveState, LocalClock, Monitor};
use crate::error::Result;
use crate::infrastructure::config::provider::ProviderKind;
use crate::infrastructure::config::settings::Config;
use crate::port::{FlightProvider, Notifier};

/// Everything the runtime needs, wired together.
pub struct Components {
    pub state: Arc<LiveState>,
    pub monitor: Arc<Monitor>,
    pub notifier_count: usize,
}

/// Build the state store seeded with the configured windows.
#[must_use]
pub fn build_state(config: &Config) -> Arc<LiveState> {
    let clock = LocalClock::resolve(&config.monitor.timezone);
    Arc::new(LiveState::with_windows(clock, config.windows.iter().cloned()))
}

/// Build the configured flight provider.
///
/// # Errors
///
/// Fails when Amadeus is selected without credentials.
#[allow(clippy::result_large_err)]
pub fn build_provider(config: &Config) -> Result<Arc<dyn FlightProvider>> {
    let provider: Arc<dyn FlightProvider> = match config.provider.kind {
        ProviderKind::Synthetic => Arc::new(SyntheticProvider::new(config.provider.synthetic.clone())),
        ProviderKind::Amadeus => Arc::new(AmadeusProvider::from_config(config.provider.amadeus.clone())?),
    };
    info!(provider = provider.name(), "Flight provider ready");
    Ok(provider)
}

/// Build notifier registry from configuration.
///
/// Always includes the log notifier. Must run inside a Tokio runtime when
/// Telegram is enabled.
#[cfg(feature = "telegram")]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier::new(config.notifier.recipients.clone())));

    if config.notifier.telegram.enabled {
        if let Some(tg_config) = TelegramConfig::from_env() {
            registry.register(Box::new(TelegramNotifier::new(tg_config)));
            info!("Telegram notifier enabled");
        } else {
            warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set");
        }
    }

    registry
}

/// Build notifier registry from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier::new(config.notifier.recipients.clone())));
    registry
}

/// Wire the full application from configuration.
///
/// # Errors
///
/// Propagates provider construction failures.
#[allow(clippy::result_large_err)]
pub fn build(config: &Config) -> Result<Components> {
    let state = build_state(config);
    let provider = build_provider(config)?;
    let registry = build_notifier_registry(config);
    let notifier_count = registry.len();
    info!(notifiers = ?registry.names(), "Notifiers ready");
    let notifier: Arc<dyn Notifier> = Arc::new(registry);

    let monitor = Arc::new(Monitor::new(
        Arc::clone(&state),
        provider,
        notifier,
        config.monitor.settings(),
    ));

    Ok(Components {
        state,
        monitor,
        notifier_count,
    })
}
