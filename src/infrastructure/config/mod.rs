//! Configuration loading and validation.

pub mod logging;
pub mod monitor;
pub mod notifier;
pub mod provider;
pub mod server;
pub mod settings;
pub mod windows;

pub use settings::Config;
