//! Command-line interface definitions.
//!
//! Defines the CLI structure for the farewatch application using `clap`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Flight fare monitor with live state streaming
#[derive(Parser, Debug)]
#[command(name = "farewatch")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the farewatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitor and HTTP server (foreground)
    Run(RunArgs),

    /// Validate configuration and list target windows
    Check(CheckArgs),
}

/// Arguments for `farewatch run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file (defaults to ./config.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run a single pass, print the resulting state as JSON and exit.
    #[arg(long)]
    pub once: bool,

    /// Override the HTTP listen address.
    #[arg(long)]
    pub listen: Option<String>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Arguments for `farewatch check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file (defaults to ./config.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
