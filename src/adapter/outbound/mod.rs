//! Outbound adapters (driven side).

pub mod amadeus;
pub mod notifier;
pub mod synthetic;
