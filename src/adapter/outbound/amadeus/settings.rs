//! Amadeus provider configuration.

use serde::Deserialize;

/// Settings for the Amadeus Self-Service flight-offers API.
///
/// Credentials never come from the config file; they are filled from the
/// `AMADEUS_CLIENT_ID` and `AMADEUS_CLIENT_SECRET` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AmadeusConfig {
    /// API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Currency requested for prices.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Maximum offers requested per search.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Timeout applied to every HTTP request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(skip)]
    pub client_id: Option<String>,
    #[serde(skip)]
    pub client_secret: Option<String>,
}

fn default_base_url() -> String {
    "https://test.api.amadeus.com".into()
}

fn default_currency() -> String {
    "EUR".into()
}

const fn default_max_results() -> u32 {
    10
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            currency: default_currency(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl AmadeusConfig {
    /// Fill credentials from the environment, keeping any already set.
    pub fn load_credentials_from_env(&mut self) {
        if self.client_id.is_none() {
            self.client_id = non_empty_env("AMADEUS_CLIENT_ID");
        }
        if self.client_secret.is_none() {
            self.client_secret = non_empty_env("AMADEUS_CLIENT_SECRET");
        }
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
