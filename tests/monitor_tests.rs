mod support;

use std::sync::Arc;
use std::time::Duration;

use farewatch::application::{Monitor, MonitorSettings, Outcome};
use farewatch::domain::{StatusTag, WindowKey};
use farewatch::port::FailureKind;
use farewatch::testkit::domain::{offer_from, offers, w1, window};
use farewatch::testkit::notifier::{FailingNotifier, RecordingNotifier};
use farewatch::testkit::provider::ScriptedProvider;
use rust_decimal_macros::dec;

use support::{monitor_with, w1_monitor};

fn w1_key() -> WindowKey {
    WindowKey::from("2026-07-01:2026-07-20")
}

#[tokio::test]
async fn seeded_windows_are_pending_before_first_pass() {
    let provider = ScriptedProvider::new();
    let (state, _monitor) = monitor_with(
        vec![w1(), window("2026-06-30", "2026-07-19")],
        Arc::new(provider.clone()),
        Arc::new(RecordingNotifier::new()),
    );

    let snapshot = state.snapshot();
    assert_eq!(snapshot.statuses.len(), 2);
    for status in snapshot.statuses.values() {
        assert_eq!(status.status, StatusTag::Pending);
        assert!(status.checked_at.is_none());
    }
    assert!(snapshot.offers.is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn cheapest_offer_is_stored_and_alerted() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(1200), dec!(950), dec!(1100)]));
    let notifier = RecordingNotifier::new();
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(notifier.clone()));

    let summary = monitor.run_pass().await;

    assert_eq!(summary.priced, 1);
    assert_eq!(summary.alerts, 1);
    let stored = state.offer(&w1_key()).expect("offer stored");
    assert_eq!(stored.offer.total_price, dec!(950));

    let status = state.status(&w1_key()).unwrap();
    assert_eq!(status.status, StatusTag::Ok);
    assert!(status.detail.contains("3 offers"));
    assert!(status.detail.contains("950.00 EUR"));
    assert!(status.checked_at.is_some());

    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].best_price, dec!(950));
    assert!(alerts[0].below_threshold);
    assert!(alerts[0].message.contains("AGP->UIO"));
    assert!(alerts[0].message.contains("2026-07-01"));
}

#[tokio::test]
async fn first_minimum_wins_ties() {
    let provider = ScriptedProvider::new().with_offers(vec![
        offer_from("KLM", dec!(1300)),
        offer_from("LATAM", dec!(990)),
        offer_from("Iberia", dec!(990)),
    ]);
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));

    monitor.run_pass().await;

    assert_eq!(state.offer(&w1_key()).unwrap().offer.airline, "LATAM");
}

#[tokio::test]
async fn price_equal_to_threshold_alerts() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(1000)]));
    let notifier = RecordingNotifier::new();
    let (_state, monitor) = w1_monitor(Arc::new(provider), Arc::new(notifier.clone()));

    monitor.run_pass().await;

    assert_eq!(notifier.alerts().len(), 1);
}

#[tokio::test]
async fn price_above_threshold_is_stored_without_alert() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(1000.01)]));
    let notifier = RecordingNotifier::new();
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(notifier.clone()));

    let summary = monitor.run_pass().await;

    assert_eq!(summary.alerts, 0);
    assert!(notifier.alerts().is_empty());
    assert_eq!(state.status(&w1_key()).unwrap().status, StatusTag::Ok);
}

#[tokio::test]
async fn empty_result_sets_empty_status() {
    let provider = ScriptedProvider::new().with_offers(vec![]);
    let notifier = RecordingNotifier::new();
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(notifier.clone()));

    let summary = monitor.run_pass().await;

    assert_eq!(summary.empty, 1);
    assert!(state.offer(&w1_key()).is_none());
    let status = state.status(&w1_key()).unwrap();
    assert_eq!(status.status, StatusTag::Empty);
    assert!(!status.detail.is_empty());
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn rate_limit_sets_error_status() {
    let provider = ScriptedProvider::new().with_error("Too Many Requests");
    let notifier = RecordingNotifier::new();
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(notifier.clone()));

    let summary = monitor.run_pass().await;

    assert_eq!(summary.failed, 1);
    assert!(state.offer(&w1_key()).is_none());
    let status = state.status(&w1_key()).unwrap();
    assert_eq!(status.status, StatusTag::Error);
    assert!(status.detail.starts_with("rate_limited"));
    assert!(status.detail.contains("60 minutes"));
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn failure_keeps_previous_offer() {
    let provider = ScriptedProvider::new()
        .with_offers(offers(&[dec!(900)]))
        .with_error("HTTP 401 Unauthorized");
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));

    monitor.run_pass().await;
    monitor.run_pass().await;

    assert_eq!(state.offer(&w1_key()).unwrap().offer.total_price, dec!(900));
    let status = state.status(&w1_key()).unwrap();
    assert_eq!(status.status, StatusTag::Error);
    assert!(status.detail.starts_with("unauthorized"));
}

#[tokio::test]
async fn later_pass_overwrites_with_higher_price() {
    let provider = ScriptedProvider::new()
        .with_offers(offers(&[dec!(900)]))
        .with_offers(offers(&[dec!(1150)]));
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));

    monitor.run_pass().await;
    monitor.run_pass().await;

    assert_eq!(state.offer(&w1_key()).unwrap().offer.total_price, dec!(1150));
}

#[tokio::test]
async fn notifier_failure_does_not_roll_back_state() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(800)]));
    let notifier = FailingNotifier::new();
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(notifier.clone()));

    let summary = monitor.run_pass().await;

    assert_eq!(notifier.attempts(), 1);
    assert_eq!(summary.alerts, 1);
    assert_eq!(state.offer(&w1_key()).unwrap().offer.total_price, dec!(800));
    assert_eq!(state.status(&w1_key()).unwrap().status, StatusTag::Ok);
}

#[tokio::test]
async fn one_failing_window_does_not_stop_the_pass() {
    let provider = ScriptedProvider::new()
        .with_error("connection reset")
        .with_offers(offers(&[dec!(1100)]));
    let second = window("2026-06-30", "2026-07-19");
    let (state, monitor) = monitor_with(
        vec![w1(), second.clone()],
        Arc::new(provider.clone()),
        Arc::new(RecordingNotifier::new()),
    );

    let summary = monitor.run_pass().await;

    assert_eq!(summary.windows, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.priced, 1);
    assert_eq!(provider.call_count(), 2);
    assert_eq!(state.status(&w1_key()).unwrap().status, StatusTag::Error);
    assert_eq!(state.status(&second.key()).unwrap().status, StatusTag::Ok);
}

#[tokio::test]
async fn provider_receives_normalized_window() {
    let provider = ScriptedProvider::new();
    let (_state, monitor) = monitor_with(
        vec![w1().with_preferred_stop("lis")],
        Arc::new(provider.clone()),
        Arc::new(RecordingNotifier::new()),
    );

    monitor.run_pass().await;

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].preferred_stop.as_deref(), Some("LIS"));
    assert_eq!(calls[0].max_layover_hours, Some(5.0));
}

#[tokio::test]
async fn search_now_registers_window_and_returns_all_offers() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(1300), dec!(1250)]));
    let (state, monitor) = monitor_with(
        vec![],
        Arc::new(provider.clone()),
        Arc::new(RecordingNotifier::new()),
    );
    let target = window("2026-08-01", "2026-08-15");

    let result = monitor.search_now(target.clone()).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(state.windows().len(), 1);
    assert_eq!(state.offer(&target.key()).unwrap().offer.total_price, dec!(1250));

    monitor.run_pass().await;
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn search_now_surfaces_classified_error() {
    let provider = ScriptedProvider::new().with_error("Amadeus error 429: quota");
    let (state, monitor) = monitor_with(
        vec![],
        Arc::new(provider),
        Arc::new(RecordingNotifier::new()),
    );
    let target = w1();

    let err = monitor.search_now(target.clone()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::RateLimited);
    assert_eq!(state.status(&target.key()).unwrap().status, StatusTag::Error);
}

#[tokio::test]
async fn check_window_reports_outcome() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(700)]));
    let (_state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));

    let report = monitor.check_window(&w1()).await;

    assert_eq!(report.key, w1_key());
    let Outcome::Priced { best, alerted, .. } = report.outcome else {
        panic!("expected priced outcome");
    };
    assert_eq!(best.total_price, dec!(700));
    assert!(alerted);
}

#[tokio::test]
async fn background_task_polls_each_interval_and_stops_on_shutdown() {
    let provider = ScriptedProvider::new();
    let state = Arc::new(farewatch::application::LiveState::with_windows(
        Default::default(),
        vec![w1()],
    ));
    let monitor = Arc::new(Monitor::new(
        Arc::clone(&state),
        Arc::new(provider.clone()),
        Arc::new(RecordingNotifier::new()),
        MonitorSettings {
            interval: Duration::from_millis(50),
            run_on_start: true,
            ..MonitorSettings::default()
        },
    ));

    let handle = Arc::clone(&monitor).spawn();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(provider.call_count() >= 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(provider.call_count() >= 2);

    handle.shutdown().await;
    let after_shutdown = provider.call_count();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(provider.call_count(), after_shutdown);
    assert_ne!(state.status(&w1_key()).unwrap().status, StatusTag::Pending);
}
