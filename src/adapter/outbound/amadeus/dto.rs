//! Amadeus wire types.

use chrono::NaiveDateTime;
use serde::Deserialize;

/// OAuth2 client-credentials response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// OAuth2 error body, e.g. `{"error": "invalid_client", ...}`.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// `GET /v2/shopping/flight-offers` response.
///
/// Entries stay as raw JSON so one malformed offer does not fail the page.
#[derive(Debug, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct FlightOfferDto {
    pub price: PriceDto,
    #[serde(default)]
    pub itineraries: Vec<ItineraryDto>,
}

#[derive(Debug, Deserialize)]
pub struct PriceDto {
    /// Decimal amount as a string, e.g. `"950.00"`.
    pub total: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct ItineraryDto {
    #[serde(default)]
    pub segments: Vec<SegmentDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDto {
    pub departure: EndpointDto,
    pub arrival: EndpointDto,
    #[serde(default)]
    pub carrier_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDto {
    pub iata_code: String,
    /// Local time at the airport.
    pub at: NaiveDateTime,
}

/// Error envelope returned by the Amadeus APIs.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorDto>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrorResponse {
    /// First human-readable message in the envelope.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.errors.first().and_then(|e| match (&e.title, &e.detail) {
            (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
            (Some(text), None) | (None, Some(text)) => Some(text.clone()),
            (None, None) => None,
        })
    }
}
