//! Mock [`FlightProvider`] implementations for testing.
//!
//! - [`ScriptedProvider`] — Pre-loaded responses returned in order.
//!   Best for: outcome handling, error classification, call recording.
//!
//! - [`GatedProvider`] — Wraps a scripted provider and blocks each search
//!   until the test releases it.
//!   Best for: observing state while a pass is in flight.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use crate::domain::{Offer, SearchWindow};
use crate::port::{FlightProvider, ProviderError};

type Response = Result<Vec<Offer>, ProviderError>;

// ---------------------------------------------------------------------------
// ScriptedProvider
// ---------------------------------------------------------------------------

/// Returns queued responses in order; an empty list once exhausted.
///
/// Every window it receives is recorded.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    responses: Arc<Mutex<VecDeque<Response>>>,
    calls: Arc<Mutex<Vec<SearchWindow>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_offers(self, offers: Vec<Offer>) -> Self {
        self.push(Ok(offers));
        self
    }

    /// Queue a failure whose kind is classified from `message`.
    pub fn with_error(self, message: &str) -> Self {
        self.push(Err(ProviderError::new("scripted", message)));
        self
    }

    pub fn push(&self, response: Response) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
    }

    /// Windows passed to `search`, in call order.
    pub fn calls(&self) -> Vec<SearchWindow> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl FlightProvider for ScriptedProvider {
    async fn search(&self, window: &SearchWindow) -> Response {
        self.calls.lock().expect("calls lock").push(window.clone());
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// GatedProvider
// ---------------------------------------------------------------------------

/// Control handle for a [`GatedProvider`].
#[derive(Clone)]
pub struct ProviderGate {
    entered: Arc<Notify>,
    release: Arc<Semaphore>,
}

impl ProviderGate {
    /// Wait until a search has started and is blocked on the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let `n` blocked searches proceed.
    pub fn release(&self, n: usize) {
        self.release.add_permits(n);
    }
}

/// A [`ScriptedProvider`] whose searches wait for [`ProviderGate::release`].
pub struct GatedProvider {
    inner: ScriptedProvider,
    gate: ProviderGate,
}

impl GatedProvider {
    pub fn new(inner: ScriptedProvider) -> (Self, ProviderGate) {
        let gate = ProviderGate {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Semaphore::new(0)),
        };
        (
            Self {
                inner,
                gate: gate.clone(),
            },
            gate,
        )
    }
}

#[async_trait]
impl FlightProvider for GatedProvider {
    async fn search(&self, window: &SearchWindow) -> Response {
        self.gate.entered.notify_one();
        if let Ok(permit) = self.gate.release.acquire().await {
            permit.forget();
        }
        self.inner.search(window).await
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}
