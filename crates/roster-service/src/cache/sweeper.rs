//! Background purge of expired cache entries.

use super::CacheInterface;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Handle to a running sweep task.
///
/// The task calls [`CacheInterface::purge_expired`] once per interval until
/// [`shutdown`](Self::shutdown) is awaited or the handle is dropped.
pub struct CacheSweeper {
    shutdown_tx: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl CacheSweeper {
    /// Spawns the sweep loop on the current tokio runtime. `every` must be
    /// non-zero.
    #[must_use]
    pub fn spawn(cache: Arc<dyn CacheInterface>, every: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let handle = tokio::spawn(async move {
            info!(interval_secs = every.as_secs(), "Cache sweeper started");

            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; nothing can be expired yet.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Cache sweeper received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        match cache.purge_expired().await {
                            Ok(purged) => debug!(purged, "Cache sweep finished"),
                            Err(e) => warn!(error = %e, "Cache sweep failed"),
                        }
                    }
                }
            }

            info!("Cache sweeper stopped");
        });

        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Signals the sweep task to stop and waits for it to finish.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Cache sweeper task ended abnormally");
            }
        }
    }
}

impl Drop for CacheSweeper {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheService;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_expired_entries() {
        let cache = Arc::new(InMemoryCacheService::new());
        cache.set_raw("short", "1", Duration::from_secs(5)).await.unwrap();
        cache.set_raw("long", "2", Duration::from_secs(500)).await.unwrap();

        let sweeper = CacheSweeper::spawn(cache.clone(), Duration::from_secs(10));

        // Let the sweeper consume its immediate first tick.
        tokio::task::yield_now().await;
        assert_eq!(cache.len(), 2);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(cache.len(), 1);

        sweeper.shutdown().await;
        assert!(cache.get_raw("long").await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweeping() {
        let cache = Arc::new(InMemoryCacheService::new());
        let sweeper = CacheSweeper::spawn(cache.clone(), Duration::from_secs(1));
        sweeper.shutdown().await;

        cache.set_raw("k", "v", Duration::from_secs(1)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Only lazy expiry is left; the entry is still stored.
        assert_eq!(cache.len(), 1);
        assert!(cache.get_raw("k").await.unwrap().is_none());
    }
}
