//! Conversion from Amadeus offers to domain offers.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;
use url::Url;

use super::dto::{FlightOfferDto, ItineraryDto};
use crate::domain::{FlightSegment, Offer, PurchaseLink, SearchWindow};

use super::PROVIDER;

/// Convert a page of raw offers, skipping malformed entries and offers whose
/// layovers exceed the window's limit.
pub fn offers(window: &SearchWindow, data: Vec<serde_json::Value>) -> Vec<Offer> {
    data.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<FlightOfferDto>(raw) {
            Ok(dto) => convert_offer(window, dto),
            Err(e) => {
                debug!(index, error = %e, "Skipping malformed offer");
                None
            }
        })
        .collect()
}

fn convert_offer(window: &SearchWindow, dto: FlightOfferDto) -> Option<Offer> {
    let Ok(total_price) = Decimal::from_str(dto.price.total.trim()) else {
        debug!(total = %dto.price.total, "Skipping offer with unparseable price");
        return None;
    };

    let segments = build_segments(&dto.itineraries);

    if let Some(limit) = window.max_layover_hours {
        if segments
            .iter()
            .any(|s| s.layover_hours.is_some_and(|h| h > limit))
        {
            return None;
        }
    }

    let offer = Offer {
        provider: PROVIDER.to_string(),
        airline: first_carrier(&dto.itineraries).unwrap_or_else(|| "Unknown".to_string()),
        currency: dto.price.currency,
        preferred_stop_matched: matches_preferred_stop(&segments, window.preferred_stop.as_deref()),
        total_price,
        segments,
        purchase_links: purchase_links(window),
    };

    if offer.validate().is_err() {
        debug!(price = %offer.total_price, "Skipping offer with negative price");
        return None;
    }
    Some(offer)
}

fn build_segments(itineraries: &[ItineraryDto]) -> Vec<FlightSegment> {
    itineraries
        .iter()
        .flat_map(|itinerary| {
            let legs = &itinerary.segments;
            legs.iter().enumerate().map(move |(i, seg)| {
                let layover_hours = legs.get(i + 1).map(|next| {
                    let gap = next.departure.at - seg.arrival.at;
                    (gap.num_seconds() as f64 / 3600.0).max(0.0)
                });
                FlightSegment {
                    origin: seg.departure.iata_code.clone(),
                    destination: seg.arrival.iata_code.clone(),
                    departure_time: seg.departure.at,
                    arrival_time: seg.arrival.at,
                    layover_hours,
                }
            })
        })
        .collect()
}

/// True when any segment except the last lands at the preferred stop.
fn matches_preferred_stop(segments: &[FlightSegment], preferred_stop: Option<&str>) -> bool {
    let Some(stop) = preferred_stop.filter(|s| !s.is_empty()) else {
        return true;
    };
    let target = stop.to_uppercase();
    segments
        .split_last()
        .is_some_and(|(_, init)| init.iter().any(|s| s.destination == target))
}

fn first_carrier(itineraries: &[ItineraryDto]) -> Option<String> {
    itineraries
        .iter()
        .flat_map(|i| &i.segments)
        .find_map(|s| s.carrier_code.clone().filter(|c| !c.is_empty()))
}

/// Booking links for the window on common metasearch sites.
pub fn purchase_links(window: &SearchWindow) -> Vec<PurchaseLink> {
    let (origin, destination) = (&window.origin, &window.destination);
    let (dep, ret) = (window.departure_date, window.return_date);

    let mut links = Vec::with_capacity(3);

    let query = format!("Flights from {origin} to {destination} on {dep} return {ret}");
    if let Ok(url) = Url::parse_with_params("https://www.google.com/travel/flights", &[("q", query)]) {
        links.push(PurchaseLink {
            label: "Google Flights".into(),
            url: url.into(),
        });
    }

    links.push(PurchaseLink {
        label: "Skyscanner".into(),
        url: format!(
            "https://www.skyscanner.es/transporte/vuelos/{origin}/{destination}/{}/{}/",
            dep.format("%Y%m%d"),
            ret.format("%Y%m%d"),
        ),
    });
    links.push(PurchaseLink {
        label: "Kayak".into(),
        url: format!("https://www.kayak.es/flights/{origin}-{destination}/{dep}/{ret}?fs=stops=0,1"),
    });

    links
}
