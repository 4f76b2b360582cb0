//! Periodic sync scheduler.
//!
//! Replaces a raw repeating timer with a cancellable loop: each sync is
//! awaited to completion before the next tick is considered, so runs never
//! overlap, and ticks that fire mid-sync are skipped rather than queued.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use super::sync_service::SyncService;

/// Handle used to stop a running daemon loop.
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Signal the loop to stop after its current operation.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown handle and the receiver the daemon loop listens on.
#[must_use]
pub fn shutdown_channel() -> (ShutdownHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, rx)
}

/// Run the periodic sync loop until the shutdown signal flips.
///
/// The first tick completes immediately, which doubles as the startup sync.
/// Per-tick failures are logged and swallowed; the timer continues
/// undisturbed and retries at the next tick with no backoff.
pub async fn run(service: SyncService, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(period_secs = period.as_secs(), "Sync daemon started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = service.sync_once().await {
                    tracing::warn!(error = %e, "Sync failed, will retry at next tick");
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    tracing::info!("Shutdown signal received, stopping sync daemon");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::QuoteStore;
    use crate::domain::ServerConfig;
    use crate::infrastructure::{LocalStorage, RemoteEndpoint};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::open(&dir.path().join("library.db")).unwrap();
        let store = Arc::new(QuoteStore::open(storage).unwrap());

        // Unroutable local endpoint: the startup sync fails fast and the
        // loop must keep running until told to stop.
        let server = ServerConfig {
            url: "http://127.0.0.1:1/quotes".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        let remote = RemoteEndpoint::new(&server).unwrap();
        let service = SyncService::new(store, remote, false);

        let (handle, rx) = shutdown_channel();
        let task = tokio::spawn(run(service, Duration::from_secs(3600), rx));

        handle.shutdown();

        tokio::time::timeout(Duration::from_secs(10), task)
            .await
            .expect("daemon loop should stop promptly after shutdown")
            .unwrap();
    }
}
