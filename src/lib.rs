//! Farewatch - flight fare monitor with live state streaming.
//!
//! Polls a flight-pricing provider for a set of round-trip date windows,
//! keeps the cheapest fare and a status per window in memory, raises an
//! alert when a fare drops to or below a threshold, and pushes every state
//! change to live subscribers over Server-Sent Events.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Windows, offers, statuses and the alert decision
//! - [`port`] - Provider and notifier traits
//! - [`application`] - State store, broadcast hub and the monitor cycle
//! - [`adapter`] - HTTP/CLI on the inbound side; providers and notifiers on
//!   the outbound side
//! - [`infrastructure`] - Configuration, wiring and process lifetime
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram alert delivery
//! - `testkit` - Test doubles and builders for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use farewatch::adapter::outbound::notifier::LogNotifier;
//! use farewatch::adapter::outbound::synthetic::SyntheticProvider;
//! use farewatch::application::{LiveState, Monitor, MonitorSettings};
//! use farewatch::infrastructure::config::windows::default_windows;
//!
//! # async fn demo() {
//! let state = Arc::new(LiveState::with_windows(Default::default(), default_windows()));
//! let monitor = Monitor::new(
//!     Arc::clone(&state),
//!     Arc::new(SyntheticProvider::default()),
//!     Arc::new(LogNotifier::default()),
//!     MonitorSettings::default(),
//! );
//! monitor.run_pass().await;
//! println!("{}", serde_json::to_string(&state.snapshot()).unwrap());
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
