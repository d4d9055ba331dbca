//! Infrastructure layer.
//!
//! Configuration, wiring and process lifetime. Contains no business logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`runtime`] - Starting and stopping the monitor and HTTP server

pub mod bootstrap;
pub mod config;
pub mod runtime;
