#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use farewatch::adapter::inbound::http::{self, ApiState};
use farewatch::application::{shutdown, LiveState, Monitor, Subscription};
use farewatch::port::{FlightProvider, Notifier};
use farewatch::testkit::config::monitor_settings;
use farewatch::testkit::domain::w1;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// State seeded with `windows` plus a monitor over it.
pub fn monitor_with(
    windows: Vec<farewatch::domain::SearchWindow>,
    provider: Arc<dyn FlightProvider>,
    notifier: Arc<dyn Notifier>,
) -> (Arc<LiveState>, Arc<Monitor>) {
    let state = Arc::new(LiveState::with_windows(Default::default(), windows));
    let monitor = Arc::new(Monitor::new(
        Arc::clone(&state),
        provider,
        notifier,
        monitor_settings(),
    ));
    (state, monitor)
}

/// Monitor tracking only window W1.
pub fn w1_monitor(
    provider: Arc<dyn FlightProvider>,
    notifier: Arc<dyn Notifier>,
) -> (Arc<LiveState>, Arc<Monitor>) {
    monitor_with(vec![w1()], provider, notifier)
}

/// Next event from a subscription, parsed.
pub async fn next_event(sub: &mut Subscription) -> serde_json::Value {
    let payload = tokio::time::timeout(Duration::from_secs(2), sub.recv())
        .await
        .expect("event within timeout")
        .expect("subscription open");
    serde_json::from_str(&payload).expect("event is JSON")
}

/// Every event currently queued, parsed.
pub fn drain(sub: &mut Subscription) -> Vec<serde_json::Value> {
    std::iter::from_fn(|| sub.try_recv())
        .map(|p| serde_json::from_str(&p).expect("event is JSON"))
        .collect()
}

/// `type` field of each event.
pub fn kinds(events: &[serde_json::Value]) -> Vec<String> {
    events
        .iter()
        .map(|e| e["type"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: watch::Sender<bool>,
    pub task: JoinHandle<farewatch::error::Result<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = tokio::time::timeout(Duration::from_secs(5), self.task).await;
    }
}

/// Serve the API for `monitor` on an ephemeral port.
pub async fn start_server(state: Arc<LiveState>, monitor: Arc<Monitor>) -> TestServer {
    let (shutdown_tx, shutdown_rx) = shutdown::channel();
    let listener = http::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let api = ApiState {
        state,
        monitor,
        notifiers: 1,
        shutdown: shutdown_rx,
    };
    let task = tokio::spawn(http::serve(listener, api));
    TestServer {
        addr,
        shutdown: shutdown_tx,
        task,
    }
}
