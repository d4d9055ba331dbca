//! Alert delivery configuration.

use serde::Deserialize;

/// `[notifier]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifierConfig {
    /// Addresses shown alongside logged alerts.
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

/// `[notifier.telegram]` section.
///
/// The bot token and chat id come from `TELEGRAM_BOT_TOKEN` and
/// `TELEGRAM_CHAT_ID`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    #[serde(default)]
    pub enabled: bool,
}
