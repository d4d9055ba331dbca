//! Live state store.
//!
//! [`LiveState`] is the single owner of the window registry, the latest
//! offer per window and the latest status per window. Every mutation goes
//! through `register`, `record_offer` or `record_status`, each of which
//! applies its change and publishes the resulting event while holding the
//! state lock. Readers therefore observe either the previous or the new
//! value, and each subscriber sees events in the order they were applied.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::broadcast::{BroadcastHub, EventKind, StateEvent, SubscriberId, Subscription};
use super::clock::LocalClock;
use super::registry::WindowRegistry;
use crate::domain::{MonitorStatus, Offer, SearchWindow, StatusTag, WindowKey};

/// A registered window together with its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub key: WindowKey,
    #[serde(flatten)]
    pub window: SearchWindow,
}

/// A stored best offer and when it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferEntry {
    #[serde(flatten)]
    pub offer: Offer,
    pub updated_at: DateTime<FixedOffset>,
}

/// Fully materialized copy of the live state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub windows: Vec<WindowEntry>,
    pub offers: BTreeMap<WindowKey, OfferEntry>,
    pub statuses: BTreeMap<WindowKey, MonitorStatus>,
}

#[derive(Debug, Default)]
struct CoreState {
    registry: WindowRegistry,
    offers: HashMap<WindowKey, OfferEntry>,
    statuses: HashMap<WindowKey, MonitorStatus>,
}

impl CoreState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            windows: self
                .registry
                .iter()
                .map(|(key, window)| WindowEntry {
                    key: key.clone(),
                    window: window.clone(),
                })
                .collect(),
            offers: self
                .offers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            statuses: self
                .statuses
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Shared, internally synchronized state store.
pub struct LiveState {
    inner: Mutex<CoreState>,
    hub: BroadcastHub,
    clock: LocalClock,
}

impl LiveState {
    #[must_use]
    pub fn new(clock: LocalClock) -> Self {
        Self {
            inner: Mutex::new(CoreState::default()),
            hub: BroadcastHub::new(),
            clock,
        }
    }

    /// Create a store seeded with `windows`, each starting as `pending`.
    #[must_use]
    pub fn with_windows(clock: LocalClock, windows: impl IntoIterator<Item = SearchWindow>) -> Self {
        let state = Self::new(clock);
        for window in windows {
            state.register(window);
        }
        state
    }

    /// Register (or replace) a window. A window without a status starts
    /// as `pending`.
    pub fn register(&self, window: SearchWindow) -> WindowKey {
        let mut inner = self.inner.lock();
        let key = inner.registry.register(window);
        inner
            .statuses
            .entry(key.clone())
            .or_insert_with(MonitorStatus::pending);
        key
    }

    /// Replace the best offer for `key` and broadcast an `offer` event.
    pub fn record_offer(&self, key: &WindowKey, offer: Offer) {
        let mut inner = self.inner.lock();
        let entry = OfferEntry {
            offer,
            updated_at: self.clock.now(),
        };
        inner.offers.insert(key.clone(), entry);

        let event = StateEvent::change(EventKind::Offer, key.clone(), inner.snapshot());
        let delivered = self.hub.publish(&event);
        debug!(key = %key, subscribers = delivered, "Offer recorded");
    }

    /// Replace the status for `key` and broadcast a `status` event.
    pub fn record_status(&self, key: &WindowKey, status: StatusTag, detail: impl Into<String>) {
        let mut inner = self.inner.lock();
        let record = MonitorStatus {
            status,
            detail: detail.into(),
            checked_at: Some(self.clock.now()),
        };
        inner.statuses.insert(key.clone(), record);

        let event = StateEvent::change(EventKind::Status, key.clone(), inner.snapshot());
        let delivered = self.hub.publish(&event);
        debug!(key = %key, status = %status, subscribers = delivered, "Status recorded");
    }

    /// Copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    /// Registered windows in insertion order.
    #[must_use]
    pub fn windows(&self) -> Vec<(WindowKey, SearchWindow)> {
        self.inner.lock().registry.list()
    }

    #[must_use]
    pub fn window(&self, key: &WindowKey) -> Option<SearchWindow> {
        self.inner.lock().registry.get(key).cloned()
    }

    #[must_use]
    pub fn offer(&self, key: &WindowKey) -> Option<OfferEntry> {
        self.inner.lock().offers.get(key).cloned()
    }

    #[must_use]
    pub fn status(&self, key: &WindowKey) -> Option<MonitorStatus> {
        self.inner.lock().statuses.get(key).cloned()
    }

    /// Latest offers keyed by window.
    #[must_use]
    pub fn offers(&self) -> BTreeMap<WindowKey, OfferEntry> {
        self.inner.lock().snapshot().offers
    }

    #[must_use]
    pub fn has_offers(&self) -> bool {
        !self.inner.lock().offers.is_empty()
    }

    /// Attach a subscriber seeded with a snapshot of the current state.
    ///
    /// Holding the state lock while attaching guarantees the subscriber
    /// neither misses nor duplicates a change around its snapshot.
    pub fn subscribe(&self) -> Subscription {
        let inner = self.inner.lock();
        self.hub.attach(&StateEvent::snapshot(inner.snapshot()))
    }

    /// Detach a subscriber. Safe to call repeatedly or with unknown ids.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.hub.unsubscribe(id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.hub.len()
    }

    #[must_use]
    pub fn clock(&self) -> &LocalClock {
        &self.clock
    }
}

impl Default for LiveState {
    fn default() -> Self {
        Self::new(LocalClock::utc())
    }
}
