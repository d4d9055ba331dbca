//! Process lifetime: starts the monitor task and the HTTP server, and tears
//! both down when shutdown is requested.

use tokio::sync::watch;
use tracing::{error, info};

use crate::adapter::inbound::http::{self, ApiState};
use crate::application::{shutdown, PassSummary, Snapshot};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run the monitor and HTTP server until `shutdown` fires.
///
/// # Errors
///
/// Fails when wiring fails or the listen address cannot be bound.
pub async fn run(config: Config, mut shutdown_rx: watch::Receiver<bool>) -> Result<()> {
    let components = bootstrap::build(&config)?;
    let listener = http::bind(&config.server.listen_address).await?;

    let api = ApiState {
        state: components.state.clone(),
        monitor: components.monitor.clone(),
        notifiers: components.notifier_count,
        shutdown: shutdown_rx.clone(),
    };
    let server = tokio::spawn(http::serve(listener, api));
    let monitor = components.monitor.spawn();

    info!(
        windows = components.state.windows().len(),
        listen = %config.server.listen_address,
        "farewatch running"
    );

    shutdown::requested(&mut shutdown_rx).await;
    info!("Shutdown requested");

    monitor.shutdown().await;
    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "HTTP server failed"),
        Err(e) => error!(error = %e, "HTTP server task failed"),
    }

    info!("farewatch stopped");
    Ok(())
}

/// Run a single pass and return the resulting snapshot.
///
/// # Errors
///
/// Fails when wiring fails.
pub async fn run_once(config: &Config) -> Result<(PassSummary, Snapshot)> {
    let components = bootstrap::build(config)?;
    let summary = components.monitor.run_pass().await;
    Ok((summary, components.state.snapshot()))
}
