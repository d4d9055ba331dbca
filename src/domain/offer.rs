//! Priced itineraries returned by providers.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// One flown leg of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSegment {
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    /// Layover after this segment, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layover_hours: Option<f64>,
}

/// A booking link for an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLink {
    pub label: String,
    pub url: String,
}

/// A priced round trip from one provider query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub provider: String,
    pub airline: String,
    pub currency: String,
    pub total_price: Decimal,
    pub segments: Vec<FlightSegment>,
    pub preferred_stop_matched: bool,
    #[serde(default)]
    pub purchase_links: Vec<PurchaseLink>,
}

impl Offer {
    /// Check that the price is non-negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.total_price < Decimal::ZERO {
            return Err(DomainError::NegativePrice {
                price: self.total_price,
            });
        }
        Ok(())
    }

    /// Longest layover across all segments, if any segment reports one.
    #[must_use]
    pub fn longest_layover_hours(&self) -> Option<f64> {
        self.segments
            .iter()
            .filter_map(|s| s.layover_hours)
            .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))))
    }
}

/// The cheapest offer in provider order.
///
/// When several offers share the lowest price the first one wins.
#[must_use]
pub fn cheapest(offers: &[Offer]) -> Option<&Offer> {
    offers.iter().min_by(|a, b| a.total_price.cmp(&b.total_price))
}
