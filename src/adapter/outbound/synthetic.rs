//! Deterministic fare generator.
//!
//! Produces one plausible offer per window from a formula over the window's
//! dates, so the whole pipeline can run without network access or
//! credentials. Identical windows always produce identical offers.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{FlightSegment, Offer, SearchWindow};
use crate::port::{FailureKind, FlightProvider, ProviderError};

const PROVIDER: &str = "synthetic";
const AIRLINES: [&str; 5] = ["Iberia", "LATAM", "Air Europa", "KLM", "Lufthansa"];
const DISTANCE_FACTOR: f64 = 1.15;
const FLOOR_PRICE: f64 = 450.0;
const PREFERRED_STOP_DISCOUNT: f64 = 35.0;
const FALLBACK_STOP: &str = "MAD";

/// Synthetic provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

const fn default_base_price() -> f64 {
    920.0
}

const fn default_volatility() -> f64 {
    120.0
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            volatility: default_volatility(),
        }
    }
}

/// Provider returning a single deterministic offer per window.
#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    config: SyntheticConfig,
}

impl SyntheticProvider {
    #[must_use]
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    fn price(&self, window: &SearchWindow, seed: u32, has_stop: bool) -> f64 {
        let extra_days = (window.trip_days() - 7).max(0) as f64;
        let length_factor = 1.0 + extra_days * 0.01;
        let oscillation = f64::from(seed).sin() * self.config.volatility;
        let discount = if has_stop { PREFERRED_STOP_DISCOUNT } else { 0.0 };

        (self.config.base_price * DISTANCE_FACTOR * length_factor + oscillation - discount)
            .max(FLOOR_PRICE)
    }
}

/// Sum of the character codes of the window's date pair.
fn seed(window: &SearchWindow) -> u32 {
    format!("{}{}", window.departure_date, window.return_date)
        .chars()
        .map(u32::from)
        .sum()
}

fn hours(h: f64) -> Duration {
    Duration::seconds((h * 3600.0).round() as i64)
}

fn build_segments(window: &SearchWindow, stop: &str, layover: f64) -> Vec<FlightSegment> {
    let outbound = NaiveDateTime::new(window.departure_date, NaiveTime::MIN) + Duration::hours(8);
    let inbound = NaiveDateTime::new(window.return_date, NaiveTime::MIN) + Duration::hours(14);

    let leg = |origin: &str, destination: &str, start: NaiveDateTime, flight: f64, layover_hours| {
        FlightSegment {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_time: start,
            arrival_time: start + hours(flight),
            layover_hours,
        }
    };

    vec![
        leg(&window.origin, stop, outbound, 2.5, Some(layover)),
        leg(stop, &window.destination, outbound + hours(2.5 + layover), 11.0, None),
        leg(&window.destination, stop, inbound, 10.5, Some(layover)),
        leg(stop, &window.origin, inbound + hours(10.5 + layover), 2.5, None),
    ]
}

#[async_trait]
impl FlightProvider for SyntheticProvider {
    async fn search(&self, window: &SearchWindow) -> Result<Vec<Offer>, ProviderError> {
        let preferred = window
            .preferred_stop
            .as_deref()
            .filter(|stop| !stop.is_empty());
        let stop = preferred.unwrap_or(FALLBACK_STOP);
        let seed = seed(window);

        let raw = self.price(window, seed, preferred.is_some());
        let total_price = Decimal::from_f64(raw)
            .map(|p| p.round_dp(2))
            .ok_or_else(|| {
                ProviderError::with_kind(
                    PROVIDER,
                    FailureKind::TransportError,
                    format!("price {raw} is not representable"),
                )
            })?;

        let layover = window.max_layover_hours.unwrap_or(3.0).min(5.0);

        Ok(vec![Offer {
            provider: PROVIDER.to_string(),
            airline: AIRLINES[seed as usize % AIRLINES.len()].to_string(),
            currency: "EUR".to_string(),
            total_price,
            segments: build_segments(window, stop, layover),
            preferred_stop_matched: true,
            purchase_links: Vec::new(),
        }])
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn window(dep: (u32, u32), ret: (u32, u32)) -> SearchWindow {
        SearchWindow::try_new(
            "AGP",
            "UIO",
            NaiveDate::from_ymd_opt(2026, dep.0, dep.1).unwrap(),
            NaiveDate::from_ymd_opt(2026, ret.0, ret.1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn same_window_same_offer() {
        let provider = SyntheticProvider::default();
        let w = window((7, 1), (7, 20)).with_preferred_stop("MAD");

        let a = provider.search(&w).await.unwrap();
        let b = provider.search(&w).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].provider, "synthetic");
        assert_eq!(a[0].currency, "EUR");
    }

    #[tokio::test]
    async fn price_never_below_floor() {
        let provider = SyntheticProvider::new(SyntheticConfig {
            base_price: 10.0,
            volatility: 0.0,
        });
        let offers = provider.search(&window((7, 1), (7, 20))).await.unwrap();
        assert_eq!(offers[0].total_price, dec!(450));
    }

    #[tokio::test]
    async fn preferred_stop_discounts_price() {
        let provider = SyntheticProvider::new(SyntheticConfig {
            base_price: 1000.0,
            volatility: 0.0,
        });
        let plain = provider.search(&window((7, 1), (7, 8))).await.unwrap();
        let via_mad = provider
            .search(&window((7, 1), (7, 8)).with_preferred_stop("MAD"))
            .await
            .unwrap();

        assert_eq!(plain[0].total_price, dec!(1150));
        assert_eq!(via_mad[0].total_price, dec!(1115));
    }

    #[tokio::test]
    async fn long_trips_cost_more() {
        let provider = SyntheticProvider::new(SyntheticConfig {
            base_price: 1000.0,
            volatility: 0.0,
        });
        // 19 days: 12 extra days at 1% each.
        let offers = provider.search(&window((7, 1), (7, 20))).await.unwrap();
        assert_eq!(offers[0].total_price, dec!(1288));
    }

    #[tokio::test]
    async fn segments_route_through_stop() {
        let provider = SyntheticProvider::default();
        let w = window((7, 1), (7, 20))
            .with_preferred_stop("LIS")
            .with_max_layover_hours(8.0);
        let offer = &provider.search(&w).await.unwrap()[0];

        let route: Vec<_> = offer
            .segments
            .iter()
            .map(|s| format!("{}-{}", s.origin, s.destination))
            .collect();
        assert_eq!(route, ["AGP-LIS", "LIS-UIO", "UIO-LIS", "LIS-AGP"]);
        assert_eq!(offer.segments[0].layover_hours, Some(5.0));
        assert_eq!(offer.segments[1].layover_hours, None);
        assert_eq!(offer.segments[0].departure_time.to_string(), "2026-07-01 08:00:00");
        assert_eq!(offer.segments[1].departure_time.to_string(), "2026-07-01 15:30:00");
    }

    #[test]
    fn airline_follows_seed() {
        let w = window((7, 1), (7, 20));
        let expected = AIRLINES[seed(&w) as usize % AIRLINES.len()];
        assert!(AIRLINES.contains(&expected));
    }
}
