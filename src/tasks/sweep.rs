//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! nobody reads again are still reclaimed.

use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Clock, EntryStore};

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for `interval_ms` between runs and takes the store lock
/// only for the sweep itself. It holds a weak reference, so it ends on its
/// own once the cache is dropped.
///
/// # Arguments
/// * `store` - Weak handle to the cache's store
/// * `clock` - Time source used to judge expiry
/// * `interval_ms` - Milliseconds between sweeps, must be non-zero
///
/// # Returns
/// A JoinHandle for the spawned task, or None when called outside a tokio
/// runtime (lazy expiry still applies in that case).
pub fn spawn_sweep_task<V, C>(
    store: Weak<Mutex<EntryStore<V>>>,
    clock: C,
    interval_ms: u64,
) -> Option<JoinHandle<()>>
where
    V: Send + 'static,
    C: Clock,
{
    let Ok(runtime) = Handle::try_current() else {
        warn!("No tokio runtime available, expiry sweep disabled");
        return None;
    };
    let interval = Duration::from_millis(interval_ms);

    Some(runtime.spawn(async move {
        info!("Starting expiry sweep task with interval of {} ms", interval_ms);

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                debug!("Cache dropped, stopping expiry sweep");
                break;
            };

            let removed = {
                let mut guard = store.lock().await;
                guard.sweep_expired(clock.now_ms())
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    }))
}
