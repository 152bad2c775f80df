use std::sync::Arc;
use std::time::{Duration, Instant};

use quickdrop_storage::UploadStore;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

use crate::registry::LinkRegistry;

/// Background task that evicts expired links and deletes their files.
///
/// File deletion is best-effort: a file that is already gone is not an error,
/// and a failed deletion never blocks eviction of the registry entry.
#[derive(Clone)]
pub struct Janitor {
    registry: Arc<LinkRegistry>,
    store: UploadStore,
    sweep_interval: Duration,
    max_age: Duration,
}

impl Janitor {
    pub fn new(
        registry: Arc<LinkRegistry>,
        store: UploadStore,
        sweep_interval: Duration,
        max_age: Duration,
    ) -> Self {
        Self {
            registry,
            store,
            sweep_interval,
            max_age,
        }
    }

    /// Start the periodic sweep task. Returns a JoinHandle that resolves once
    /// the shutdown token is cancelled.
    pub fn start(self, shutdown: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_tick = interval(self.sweep_interval);

            loop {
                tokio::select! {
                    _ = sweep_tick.tick() => {
                        let evicted = self.run_once(Instant::now()).await;
                        if evicted > 0 {
                            tracing::info!(evicted, "Expired link cleanup completed");
                        }
                    }
                    _ = shutdown.cancelled() => {
                        tracing::info!("Janitor shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// One sweep pass: evict every record expired at `now` and delete its
    /// files. Returns the number of evicted records.
    pub async fn run_once(&self, now: Instant) -> usize {
        let expired = self.registry.sweep_expired(now, self.max_age);
        let count = expired.len();

        for record in expired {
            tracing::info!(
                link_id = %record.id,
                path = %record.file_path.display(),
                "Deleting expired upload"
            );

            if let Err(e) = self.store.remove_path(&record.file_path).await {
                tracing::error!(
                    error = %e,
                    path = %record.file_path.display(),
                    "Failed to delete expired upload, continuing"
                );
            }

            if let Some(ref qr_path) = record.qr_path {
                if let Err(e) = self.store.remove_path(qr_path).await {
                    tracing::debug!(
                        error = %e,
                        path = %qr_path.display(),
                        "Failed to delete QR image, continuing"
                    );
                }
            }
        }

        count
    }
}
