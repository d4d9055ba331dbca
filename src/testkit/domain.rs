//! Builders for domain primitives used across tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Offer, SearchWindow};

/// Parse `YYYY-MM-DD`.
///
/// # Panics
///
/// Panics on malformed input.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// An AGP to UIO window between two dates.
///
/// # Panics
///
/// Panics when `ret` is not after `dep`.
pub fn window(dep: &str, ret: &str) -> SearchWindow {
    SearchWindow::try_new("AGP", "UIO", date(dep), date(ret)).expect("valid test window")
}

/// Window W1 from the reference scenarios: 2026-07-01 to 2026-07-20.
pub fn w1() -> SearchWindow {
    window("2026-07-01", "2026-07-20")
}

/// An offer at `price` EUR with no segments.
pub fn offer(price: Decimal) -> Offer {
    offer_from("Iberia", price)
}

pub fn offer_from(airline: &str, price: Decimal) -> Offer {
    Offer {
        provider: "scripted".into(),
        airline: airline.into(),
        currency: "EUR".into(),
        total_price: price,
        segments: Vec::new(),
        preferred_stop_matched: true,
        purchase_links: Vec::new(),
    }
}

/// One offer per price, in order.
pub fn offers(prices: &[Decimal]) -> Vec<Offer> {
    prices.iter().copied().map(offer).collect()
}
