mod support;

use std::sync::Arc;

use farewatch::testkit::domain::{offers, w1};
use farewatch::testkit::notifier::RecordingNotifier;
use farewatch::testkit::provider::{GatedProvider, ScriptedProvider};
use rust_decimal_macros::dec;

use support::{drain, kinds, next_event, w1_monitor};

const W1: &str = "2026-07-01:2026-07-20";

#[tokio::test]
async fn subscriber_before_pass_sees_snapshot_then_every_change() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(1200), dec!(950), dec!(1100)]));
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));
    let mut s1 = state.subscribe();

    monitor.run_pass().await;

    let events = drain(&mut s1);
    assert_eq!(kinds(&events), ["snapshot", "status", "offer", "status"]);

    assert_eq!(events[0]["statuses"][W1]["status"], "pending");
    assert!(events[0].get("key").is_none());

    assert_eq!(events[1]["key"], W1);
    assert_eq!(events[1]["statuses"][W1]["status"], "running");
    assert_eq!(events[1]["statuses"][W1]["detail"], "querying provider");

    assert_eq!(events[2]["offers"][W1]["total_price"], "950");

    assert_eq!(events[3]["statuses"][W1]["status"], "ok");
    assert_eq!(events[3]["windows"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn subscriber_joining_mid_pass_sees_current_state_then_later_events() {
    let scripted = ScriptedProvider::new().with_offers(offers(&[dec!(1200), dec!(950)]));
    let (gated, gate) = GatedProvider::new(scripted);
    let (state, monitor) = w1_monitor(Arc::new(gated), Arc::new(RecordingNotifier::new()));
    let mut s1 = state.subscribe();

    let pass = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        async move { monitor.run_pass().await }
    });
    gate.entered().await;

    let mut s2 = state.subscribe();
    let seed = next_event(&mut s2).await;
    assert_eq!(seed["type"], "snapshot");
    assert_eq!(seed["statuses"][W1]["status"], "running");
    assert!(seed["offers"].as_object().unwrap().is_empty());

    gate.release(1);
    pass.await.unwrap();

    let s2_events = drain(&mut s2);
    assert_eq!(kinds(&s2_events), ["offer", "status"]);
    assert_eq!(s2_events[1]["statuses"][W1]["status"], "ok");

    let s1_events = drain(&mut s1);
    assert_eq!(kinds(&s1_events), ["snapshot", "status", "offer", "status"]);
}

#[tokio::test]
async fn every_subscriber_gets_one_event_per_change() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(990)]));
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));
    let mut subscribers: Vec<_> = (0..5).map(|_| state.subscribe()).collect();

    monitor.run_pass().await;

    for sub in &mut subscribers {
        assert_eq!(kinds(&drain(sub)), ["snapshot", "status", "offer", "status"]);
    }
}

#[tokio::test]
async fn dropped_subscribers_are_pruned() {
    let provider = ScriptedProvider::new().with_offers(offers(&[dec!(990)]));
    let (state, monitor) = w1_monitor(Arc::new(provider), Arc::new(RecordingNotifier::new()));
    let mut kept = state.subscribe();
    let gone = state.subscribe();
    assert_eq!(state.subscriber_count(), 2);

    drop(gone);
    monitor.run_pass().await;

    assert_eq!(state.subscriber_count(), 1);
    assert_eq!(drain(&mut kept).len(), 4);
}

#[tokio::test]
async fn unsubscribe_is_idempotent_and_ignores_unknown_ids() {
    let (state, _monitor) = w1_monitor(
        Arc::new(ScriptedProvider::new()),
        Arc::new(RecordingNotifier::new()),
    );
    let sub = state.subscribe();

    assert!(state.unsubscribe(sub.id()));
    assert!(!state.unsubscribe(sub.id()));
    assert!(!state.unsubscribe(424_242));
    assert_eq!(state.subscriber_count(), 0);
}

#[tokio::test]
async fn snapshot_lists_windows_in_insertion_order() {
    let (state, _monitor) = w1_monitor(
        Arc::new(ScriptedProvider::new()),
        Arc::new(RecordingNotifier::new()),
    );
    state.register(farewatch::testkit::domain::window("2026-06-30", "2026-07-18"));
    state.register(w1().with_preferred_stop("LIS"));

    let mut sub = state.subscribe();
    let seed = next_event(&mut sub).await;
    let keys: Vec<_> = seed["windows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, [W1, "2026-06-30:2026-07-18"]);
    assert_eq!(seed["windows"][0]["preferred_stop"], "LIS");
}
