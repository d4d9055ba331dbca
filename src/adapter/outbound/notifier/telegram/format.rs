//! Message formatting for Telegram alerts.

use crate::domain::PriceAlert;

/// Format an alert as a `MarkdownV2` message.
pub fn format_alert_message(alert: &PriceAlert) -> String {
    let window = &alert.window;
    let stop = window.preferred_stop.as_deref().unwrap_or("-");

    format!(
        "✈️ *Cheap Fare*\n\
        \n\
        🛫 Route: `{}`\n\
        📅 Dates: `{}` → `{}`\n\
        💰 Price: `{}`\n\
        🔁 Preferred stop: `{}`\n\
        📝 {}",
        escape_markdown(&window.route()),
        escape_markdown(&window.departure_date.to_string()),
        escape_markdown(&window.return_date.to_string()),
        escape_markdown(&format!("{:.2} {}", alert.best_price, alert.currency)),
        escape_markdown(stop),
        escape_markdown(&alert.message),
    )
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{evaluate, Offer, SearchWindow};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn escapes_markdown_specials() {
        assert_eq!(escape_markdown("AGP->UIO"), "AGP\\-\\>UIO");
        assert_eq!(escape_markdown("950.00"), "950\\.00");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn alert_message_contains_escaped_fields() {
        let window = SearchWindow::try_new(
            "AGP",
            "UIO",
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 20).unwrap(),
        )
        .unwrap()
        .with_preferred_stop("MAD");
        let offer = Offer {
            provider: "synthetic".into(),
            airline: "Iberia".into(),
            currency: "EUR".into(),
            total_price: dec!(950),
            segments: vec![],
            preferred_stop_matched: true,
            purchase_links: vec![],
        };
        let alert = evaluate(&window, &offer, dec!(1000)).unwrap();

        let text = format_alert_message(&alert);
        assert!(text.contains("AGP\\-\\>UIO"));
        assert!(text.contains("950\\.00 EUR"));
        assert!(text.contains("`MAD`"));
    }
}
