//! Shutdown signalling shared by the monitor task and the HTTP server.

use tokio::sync::watch;

/// Create a shutdown channel. Sending `true` requests shutdown.
#[must_use]
pub fn channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

/// Resolve once shutdown is requested or the sender is dropped.
pub async fn requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn resolves_on_signal() {
        let (tx, mut rx) = channel();
        let waiter = tokio::spawn(async move { requested(&mut rx).await });
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("shutdown not observed")
            .unwrap();
    }

    #[tokio::test]
    async fn resolves_when_sender_dropped() {
        let (tx, mut rx) = channel();
        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), requested(&mut rx))
            .await
            .expect("closed channel not observed");
    }
}
