//! Handler for the `run` command.

use tracing::{error, info};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::application::shutdown;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if let Some(listen) = &args.listen {
        config.server.listen_address.clone_from(listen);
    }
    config.init_logging();

    if args.once {
        let (summary, snapshot) = runtime::run_once(&config).await?;
        info!(
            priced = summary.priced,
            empty = summary.empty,
            failed = summary.failed,
            "Single pass finished"
        );
        output::document(&snapshot);
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = shutdown::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    });

    runtime::run(config, shutdown_rx).await
}
