//! Alert delivery adapters.
//!
//! Implements the `port::Notifier` trait for the log sink and, with the
//! `telegram` feature, a Telegram chat.

mod log;
mod registry;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::{LogNotifier, NullNotifier};
pub use registry::NotifierRegistry;
