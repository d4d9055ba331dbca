//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`] — Scripted [`FlightProvider`](crate::port::FlightProvider)
//!   doubles: `ScriptedProvider`, `GatedProvider`.
//! - [`notifier`] — `RecordingNotifier` and `FailingNotifier`.
//! - [`domain`] — Builders for windows and offers.
//! - [`config`] — Canonical test configurations.

pub mod config;
pub mod domain;
pub mod notifier;
pub mod provider;
