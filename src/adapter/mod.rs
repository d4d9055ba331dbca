//! Implementations of ports (hexagonal adapters).
//!
//! - `inbound`: HTTP API and CLI, driving the application
//! - `outbound`: flight providers and notifiers, driven by the application

pub mod inbound;
pub mod outbound;
