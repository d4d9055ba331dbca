//! HTTP surface: JSON status endpoints, on-demand search and the live
//! event stream.

mod error;
mod handlers;
mod stream;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

pub use error::ApiError;
pub use handlers::HealthResponse;

use crate::application::{shutdown, LiveState, Monitor};
use crate::error::{Error, Result};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub state: Arc<LiveState>,
    pub monitor: Arc<Monitor>,
    /// Number of configured notifiers, reported by `/health`.
    pub notifiers: usize,
    /// Ends open event streams on shutdown.
    pub shutdown: watch::Receiver<bool>,
}

/// Build the router.
pub fn router(api: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/targets", get(handlers::targets))
        .route("/offers", get(handlers::offers))
        .route("/state", get(handlers::state))
        .route("/search", post(handlers::search))
        .route("/events/offers", get(stream::offer_events))
        .with_state(api)
}

/// Bind the listen address.
pub async fn bind(listen_address: &str) -> Result<TcpListener> {
    let addr: SocketAddr = listen_address.parse().map_err(|e| {
        Error::Server(format!("invalid listen address {listen_address}: {e}"))
    })?;
    Ok(TcpListener::bind(addr).await?)
}

/// Serve until shutdown is requested, then drain open connections.
pub async fn serve(listener: TcpListener, api: ApiState) -> Result<()> {
    let mut shutdown_rx = api.shutdown.clone();
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "HTTP server listening");
    }

    axum::serve(listener, router(api).into_make_service())
        .with_graceful_shutdown(async move { shutdown::requested(&mut shutdown_rx).await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
