//! Command-line interface.

pub mod check;
pub mod command;
pub mod output;
pub mod run;

pub use command::{Cli, Commands};

use crate::error::Result;

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
    });

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(args) => check::execute(&args),
    }
}
