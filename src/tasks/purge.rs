//! Cache Purge Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Expiry is already enforced lazily on every read, so running this task is
//! optional; it only bounds how long a dead entry can occupy memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that purges expired entries every `interval`.
///
/// The task loops forever, sleeping between runs and taking the cache's
/// write lock only for the purge itself.
///
/// Returns the JoinHandle for the spawned task; abort it to stop purging.
///
/// # Example
/// ```ignore
/// let purge_handle = spawn_purge_task(resource.cache(), Duration::from_secs(60));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task(cache: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("starting cache purge task (every {:?})", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!("cache purge removed {} expired entries", removed);
            } else {
                debug!("cache purge found no expired entries");
            }
        }
    })
}
