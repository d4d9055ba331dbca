//! Telegram notifier.
//!
//! Provides the [`TelegramNotifier`] for sending price alerts to a chat.
//! Delivery is queued and handled by a background worker so the monitor
//! never waits on the Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::domain::PriceAlert;
use crate::port::{Notifier, NotifyError};

use super::format::format_alert_message;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for alerts.
    pub chat_id: i64,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`. Returns `None` if
    /// either is missing or invalid.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .and_then(|s| s.parse().ok())?;

        Some(Self { bot_token, chat_id })
    }
}

/// Telegram notifier that sends alerts to a chat.
pub struct TelegramNotifier {
    /// Channel sender for queuing outbound alerts.
    sender: mpsc::UnboundedSender<PriceAlert>,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier and spawn the background worker.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(telegram_worker(config, receiver));
        Self { sender }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, alert: &PriceAlert) -> Result<(), NotifyError> {
        self.sender.send(alert.clone()).map_err(|_| {
            warn!("Telegram notifier channel closed");
            NotifyError::ChannelClosed {
                notifier: "telegram",
            }
        })
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

/// Background worker that sends Telegram messages.
async fn telegram_worker(config: TelegramConfig, mut receiver: mpsc::UnboundedReceiver<PriceAlert>) {
    let bot = Bot::new(&config.bot_token);
    let chat_id = ChatId(config.chat_id);

    info!(chat_id = config.chat_id, "Telegram notifier started");

    while let Some(alert) = receiver.recv().await {
        let text = format_alert_message(&alert);

        if let Err(e) = bot
            .send_message(chat_id, &text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
        {
            error!(error = %e, "Failed to send Telegram message");
        }
    }

    warn!("Telegram notifier worker shutting down");
}
