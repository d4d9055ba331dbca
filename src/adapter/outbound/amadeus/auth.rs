//! OAuth2 client-credentials token cache.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use reqwest::Client as HttpClient;
use tokio::sync::Mutex;
use tracing::debug;

use super::dto::{TokenErrorResponse, TokenResponse};
use super::PROVIDER;
use crate::port::{FailureKind, ProviderError};

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on the lifetime accepted from a token response.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Fetches and caches access tokens.
///
/// The async mutex is held across the token request so concurrent searches
/// share one refresh.
pub struct TokenCache {
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
    /// Set when the token endpoint last rejected the credentials.
    rejected: AtomicBool,
}

impl TokenCache {
    pub fn new(base_url: &str, client_id: String, client_secret: String) -> Self {
        Self {
            token_url: format!("{base_url}/v1/security/oauth2/token"),
            client_id,
            client_secret,
            cached: Mutex::new(None),
            rejected: AtomicBool::new(false),
        }
    }

    /// False once the token endpoint has rejected the credentials, until a
    /// later request succeeds.
    pub fn credentials_accepted(&self) -> bool {
        !self.rejected.load(Ordering::Relaxed)
    }

    /// A valid access token, fetching a fresh one when needed.
    pub async fn token(&self, http: &HttpClient) -> Result<String, ProviderError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + REFRESH_MARGIN < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.fetch(http).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    /// Forget the cached token, e.g. after the API rejected it.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    async fn fetch(&self, http: &HttpClient) -> Result<CachedToken, ProviderError> {
        debug!(url = %self.token_url, "Requesting Amadeus access token");

        let response = http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::with_kind(PROVIDER, FailureKind::TransportError, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                })
                .unwrap_or(body);
            let kind = match FailureKind::from_status(status.as_u16()) {
                FailureKind::TransportError => FailureKind::classify(&reason),
                kind => kind,
            };
            if kind == FailureKind::Unauthorized {
                self.rejected.store(true, Ordering::Relaxed);
            }
            return Err(ProviderError::with_kind(
                PROVIDER,
                kind,
                format!("Amadeus token error {}: {reason}", status.as_u16()),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ProviderError::with_kind(
                PROVIDER,
                FailureKind::TransportError,
                format!("invalid token response: {e}"),
            )
        })?;

        self.rejected.store(false, Ordering::Relaxed);
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in).min(MAX_TOKEN_LIFETIME),
        })
    }
}
