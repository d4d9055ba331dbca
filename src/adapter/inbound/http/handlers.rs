//! Request handlers for the JSON endpoints.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::info;

use super::{ApiError, ApiState};
use crate::application::{OfferEntry, WindowEntry};
use crate::domain::{SearchWindow, WindowKey};

/// Response body of `GET /health`.
#[derive(Debug, Serialize, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: &'static str,
    pub provider_ready: bool,
    pub interval_minutes: u64,
    pub windows: usize,
    pub notifiers: usize,
    pub subscribers: usize,
    pub timezone: String,
}

pub async fn health(State(api): State<ApiState>) -> impl IntoResponse {
    let settings = api.monitor.settings();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: api.monitor.provider_name(),
        provider_ready: api.monitor.provider_ready(),
        interval_minutes: settings.interval.as_secs() / 60,
        windows: api.state.windows().len(),
        notifiers: api.notifiers,
        subscribers: api.state.subscriber_count(),
        timezone: api.state.clock().zone_name().to_string(),
    })
}

/// Registered windows in insertion order.
pub async fn targets(State(api): State<ApiState>) -> Json<Vec<WindowEntry>> {
    let windows = api
        .state
        .windows()
        .into_iter()
        .map(|(key, window)| WindowEntry { key, window })
        .collect();
    Json(windows)
}

/// Latest offers. Runs one pass first when nothing has been priced yet.
pub async fn offers(State(api): State<ApiState>) -> Json<BTreeMap<WindowKey, OfferEntry>> {
    if !api.state.has_offers() {
        info!("No offers yet, running a pass before answering");
        api.monitor.run_pass().await;
    }
    Json(api.state.offers())
}

pub async fn state(State(api): State<ApiState>) -> impl IntoResponse {
    Json(api.state.snapshot())
}

/// On-demand search. The window is registered for future passes.
pub async fn search(
    State(api): State<ApiState>,
    Json(window): Json<SearchWindow>,
) -> Result<impl IntoResponse, ApiError> {
    window.validate()?;
    let offers = api.monitor.search_now(window).await?;
    Ok((StatusCode::OK, Json(offers)))
}
