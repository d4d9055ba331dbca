//! Broadcast hub: fan-out of state events to live subscribers.
//!
//! Each subscriber owns an unbounded queue, so a slow or stalled viewer
//! never blocks the publisher. Publishing iterates a copy of the registry;
//! subscribers whose receiving side is gone are pruned silently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::state::Snapshot;
use crate::domain::WindowKey;

/// Identifier handed out to each subscriber.
pub type SubscriberId = u64;

type SubscriberMap = HashMap<SubscriberId, mpsc::UnboundedSender<String>>;

/// What triggered a state event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Full state sent to a new subscriber.
    Snapshot,
    /// A window's best offer changed.
    Offer,
    /// A window's status changed.
    Status,
}

/// Event pushed to subscribers: the trigger plus the full current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Window that changed; absent for snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<WindowKey>,
    #[serde(flatten)]
    pub state: Snapshot,
}

impl StateEvent {
    #[must_use]
    pub fn snapshot(state: Snapshot) -> Self {
        Self {
            kind: EventKind::Snapshot,
            key: None,
            state,
        }
    }

    #[must_use]
    pub fn change(kind: EventKind, key: WindowKey, state: Snapshot) -> Self {
        Self {
            kind,
            key: Some(key),
            state,
        }
    }
}

/// A live subscriber's receiving end.
///
/// Dropping the subscription removes it from the hub.
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::UnboundedReceiver<String>,
    registry: Weak<Mutex<SubscriberMap>>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next serialized event.
    ///
    /// Returns `None` once the hub is gone or the subscriber was removed.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Take the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(&self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Registry of subscriber queues.
#[derive(Default)]
pub struct BroadcastHub {
    subscribers: Arc<Mutex<SubscriberMap>>,
    next_id: AtomicU64,
}

impl BroadcastHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber whose queue starts with `seed`.
    ///
    /// The seed is queued before the subscriber becomes visible to
    /// [`BroadcastHub::publish`], so it is always the first message received.
    pub fn attach(&self, seed: &StateEvent) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();

        match serde_json::to_string(seed) {
            Ok(payload) => {
                let _ = sender.send(payload);
            }
            Err(e) => error!(error = %e, "Failed to serialize subscriber seed"),
        }

        self.subscribers.lock().insert(id, sender);
        debug!(subscriber = id, "Subscriber attached");

        Subscription {
            id,
            receiver,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    /// Remove a subscriber. Unknown or already-removed ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.lock().remove(&id).is_some();
        if removed {
            debug!(subscriber = id, "Subscriber detached");
        }
        removed
    }

    /// Push an event to every current subscriber. Returns how many
    /// subscribers received it.
    pub fn publish(&self, event: &StateEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, kind = ?event.kind, "Failed to serialize state event");
                return 0;
            }
        };

        let targets: Vec<(SubscriberId, mpsc::UnboundedSender<String>)> = self
            .subscribers
            .lock()
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect();

        let mut delivered = 0;
        let mut gone = Vec::new();
        for (id, sender) in targets {
            if sender.send(payload.clone()).is_ok() {
                delivered += 1;
            } else {
                gone.push(id);
            }
        }

        if !gone.is_empty() {
            let mut subscribers = self.subscribers.lock();
            for id in gone {
                subscribers.remove(&id);
                debug!(subscriber = id, "Dropped disconnected subscriber");
            }
        }

        delivered
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }
}
