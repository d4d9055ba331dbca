//! Domain types: windows, offers, statuses and the alert decision.
//!
//! Nothing in here performs I/O.

pub mod alert;
pub mod error;
pub mod offer;
pub mod status;
pub mod window;

pub use alert::{evaluate, should_alert, PriceAlert};
pub use error::DomainError;
pub use offer::{cheapest, FlightSegment, Offer, PurchaseLink};
pub use status::{MonitorStatus, StatusTag};
pub use window::{SearchWindow, WindowDefaults, WindowKey};
