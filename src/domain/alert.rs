//! Price alert decision.
//!
//! Pure functions: no provider, network or clock involved.

use rust_decimal::Decimal;
use serde::Serialize;

use super::offer::Offer;
use super::window::SearchWindow;

/// An alert raised for a cheap fare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAlert {
    pub window: SearchWindow,
    pub best_price: Decimal,
    pub currency: String,
    pub below_threshold: bool,
    pub message: String,
}

/// Whether `offer` is cheap enough to alert on. Equality alerts.
#[must_use]
pub fn should_alert(offer: &Offer, threshold: Decimal) -> bool {
    offer.total_price <= threshold
}

/// Build an alert for `offer` if it is at or below `threshold`.
#[must_use]
pub fn evaluate(window: &SearchWindow, offer: &Offer, threshold: Decimal) -> Option<PriceAlert> {
    if !should_alert(offer, threshold) {
        return None;
    }

    Some(PriceAlert {
        window: window.clone(),
        best_price: offer.total_price,
        currency: offer.currency.clone(),
        below_threshold: true,
        message: render_message(window, offer),
    })
}

fn render_message(window: &SearchWindow, offer: &Offer) -> String {
    format!(
        "{} {} - {} for {:.2} {} ({})",
        window.route(),
        window.departure_date,
        window.return_date,
        offer.total_price,
        offer.currency,
        offer.airline,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn window() -> SearchWindow {
        SearchWindow::try_new(
            "AGP",
            "UIO",
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 20).unwrap(),
        )
        .unwrap()
    }

    fn offer(price: Decimal) -> Offer {
        Offer {
            provider: "test".into(),
            airline: "Iberia".into(),
            currency: "EUR".into(),
            total_price: price,
            segments: vec![],
            preferred_stop_matched: true,
            purchase_links: vec![],
        }
    }

    #[test]
    fn alerts_below_and_at_threshold() {
        assert!(should_alert(&offer(dec!(950)), dec!(1000)));
        assert!(should_alert(&offer(dec!(1000)), dec!(1000)));
        assert!(!should_alert(&offer(dec!(1000.01)), dec!(1000)));
    }

    #[test]
    fn evaluate_renders_route_dates_and_price() {
        let alert = evaluate(&window(), &offer(dec!(950)), dec!(1000)).unwrap();
        assert!(alert.below_threshold);
        assert_eq!(alert.best_price, dec!(950));
        assert_eq!(
            alert.message,
            "AGP->UIO 2026-07-01 - 2026-07-20 for 950.00 EUR (Iberia)"
        );
    }

    #[test]
    fn evaluate_skips_expensive_offer() {
        assert!(evaluate(&window(), &offer(dec!(1200)), dec!(1000)).is_none());
    }
}
