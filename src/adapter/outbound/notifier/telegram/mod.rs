//! Telegram alert delivery.
//!
//! Requires the `telegram` feature to be enabled.

mod format;
pub mod notifier;

pub use notifier::{TelegramConfig, TelegramNotifier};
