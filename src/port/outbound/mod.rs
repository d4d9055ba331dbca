//! Outbound ports: capabilities the core consumes.

pub mod notifier;
pub mod provider;
