//! Server-Sent Events stream of live state.
//!
//! Each connection subscribes to [`LiveState`](crate::application::LiveState)
//! and forwards every serialized event as one `data:` frame. The first frame
//! is always the snapshot. Dropping the stream drops the subscription, which
//! detaches it from the hub.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream, StreamExt};
use tracing::debug;

use super::ApiState;
use crate::application::shutdown;

pub async fn offer_events(
    State(api): State<ApiState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = api.state.subscribe();
    debug!(subscriber = subscription.id(), "SSE client connected");

    let mut shutdown_rx = api.shutdown.clone();
    let events = stream::unfold(subscription, |mut subscription| async move {
        let payload = subscription.recv().await?;
        Some((Ok(Event::default().data(payload)), subscription))
    })
    .take_until(async move { shutdown::requested(&mut shutdown_rx).await });

    Sse::new(events).keep_alive(KeepAlive::default())
}
