//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  monitor + live state   ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────┐                                          ┌───────────┐
//! │ Provider │                                          │ Notifier  │
//! │ Adapter  │                                          │  Adapter  │
//! └──────────┘                                          └───────────┘
//! ```
//!
//! - [`FlightProvider`] - fare search (synthetic, Amadeus)
//! - [`Notifier`] - alert delivery (log, Telegram)

pub mod outbound;

pub use outbound::notifier::{Notifier, NotifyError};
pub use outbound::provider::{FailureKind, FlightProvider, ProviderError};
