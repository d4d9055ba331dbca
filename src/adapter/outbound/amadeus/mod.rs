//! Amadeus Self-Service flight-offers provider.
//!
//! Authenticates with OAuth2 client credentials and queries
//! `GET /v2/shopping/flight-offers` for one adult round trip per window.
//! HTTP failures are classified by status code so the monitor can tell
//! throttling and credential problems apart from transport errors.

mod auth;
mod convert;
pub mod dto;
pub mod settings;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, warn};

use self::auth::TokenCache;
use self::dto::{ApiErrorResponse, FlightOffersResponse};
pub use self::settings::AmadeusConfig;
use crate::domain::{Offer, SearchWindow};
use crate::error::{ConfigError, Result};
use crate::port::{FailureKind, FlightProvider, ProviderError};

pub(crate) const PROVIDER: &str = "amadeus";

/// HTTP client for the Amadeus flight-offers API.
pub struct AmadeusProvider {
    http: HttpClient,
    config: AmadeusConfig,
    auth: TokenCache,
}

impl AmadeusProvider {
    /// Build a provider from settings with credentials already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when either credential is absent.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: AmadeusConfig) -> Result<Self> {
        let client_id = config.client_id.clone().ok_or(ConfigError::MissingField {
            field: "AMADEUS_CLIENT_ID",
        })?;
        let client_secret = config
            .client_secret
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "AMADEUS_CLIENT_SECRET",
            })?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let auth = TokenCache::new(&base_url, client_id, client_secret);

        Ok(Self {
            http,
            config: AmadeusConfig { base_url, ..config },
            auth,
        })
    }

    fn offers_url(&self) -> String {
        format!("{}/v2/shopping/flight-offers", self.config.base_url)
    }

    async fn error_from_response(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(|e| e.summary())
            .unwrap_or(body);
        let reason = status.canonical_reason().unwrap_or("error");

        ProviderError::with_kind(
            PROVIDER,
            FailureKind::from_status(status.as_u16()),
            format!("Amadeus error {} {reason}: {detail}", status.as_u16()),
        )
    }
}

fn transport(e: &reqwest::Error) -> ProviderError {
    ProviderError::with_kind(PROVIDER, FailureKind::TransportError, e.to_string())
}

#[async_trait]
impl FlightProvider for AmadeusProvider {
    async fn search(&self, window: &SearchWindow) -> std::result::Result<Vec<Offer>, ProviderError> {
        let token = self.auth.token(&self.http).await?;

        let departure = window.departure_date.to_string();
        let return_date = window.return_date.to_string();
        let max = self.config.max_results.to_string();
        let query = [
            ("originLocationCode", window.origin.as_str()),
            ("destinationLocationCode", window.destination.as_str()),
            ("departureDate", departure.as_str()),
            ("returnDate", return_date.as_str()),
            ("adults", "1"),
            ("currencyCode", self.config.currency.as_str()),
            ("max", max.as_str()),
        ];

        debug!(key = %window.key(), route = %window.route(), "Querying Amadeus");

        let response = self
            .http
            .get(self.offers_url())
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.auth.invalidate().await;
        }
        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let page: FlightOffersResponse = response.json().await.map_err(|e| transport(&e))?;
        let received = page.data.len();
        let offers = convert::offers(window, page.data);

        debug!(
            key = %window.key(),
            received,
            kept = offers.len(),
            "Amadeus search complete"
        );
        Ok(offers)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn is_ready(&self) -> bool {
        self.config.has_credentials() && self.auth.credentials_accepted()
    }
}
