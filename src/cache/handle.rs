//! Cache Handle Module
//!
//! The thread-safe public face of the cache. A `Cache` is a cheap, cloneable
//! handle; every clone talks to the same store, which sits behind one async
//! mutex shared with the background sweep.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, CacheStats, Clock, EntryStore, SetOptions, SystemClock};
use crate::tasks::spawn_sweep_task;

struct Inner<V, C> {
    store: Arc<Mutex<EntryStore<V>>>,
    clock: C,
    sweeper: std::sync::Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl<V, C> Inner<V, C> {
    fn take_sweeper(&self) -> Option<JoinHandle<()>> {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<V, C> Drop for Inner<V, C> {
    fn drop(&mut self) {
        if let Some(handle) = self.take_sweeper() {
            handle.abort();
        }
    }
}

// == Cache ==
/// In-process key/value cache with LRU capacity eviction, per-entry TTL, tag
/// invalidation and a periodic expiry sweep.
///
/// Values are handed back as clones; store an `Arc<T>` to share large
/// payloads.
///
/// `get_or_set` does not deduplicate concurrent misses: two callers racing on
/// the same absent key may both run their factory, and the last write wins.
///
/// # Example
/// ```
/// use tagcache::cache::{Cache, CacheConfig, SetOptions};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache: Cache<u32> = Cache::new(CacheConfig::new().max_size(2));
/// cache.set("a", 1, SetOptions::default()).await;
/// cache.set("b", 2, SetOptions::tagged(["even"])).await;
///
/// assert_eq!(cache.get("a").await, Some(1));
/// cache.invalidate_tag("even").await;
/// assert!(!cache.has("b").await);
/// # cache.close().await;
/// # }
/// ```
pub struct Cache<V, C = SystemClock> {
    inner: Arc<Inner<V, C>>,
}

impl<V, C> Clone for Cache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Cache<V, SystemClock>
where
    V: Clone + Send + 'static,
{
    /// Creates a cache that reads the system clock.
    ///
    /// When the sweep is enabled this must run inside a tokio runtime;
    /// otherwise the sweep is skipped with a warning.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C> Cache<V, C>
where
    V: Clone + Send + 'static,
    C: Clock + Clone,
{
    /// Creates a cache driven by a custom clock (useful for testing).
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        let store = Arc::new(Mutex::new(EntryStore::from_config(&config)));

        let sweeper = config
            .sweep_interval_ms()
            .and_then(|ms| spawn_sweep_task(Arc::downgrade(&store), clock.clone(), ms));

        debug!(
            "Cache created: max_size={:?}, default_ttl={:?}, sweep={}",
            config.capacity(),
            config.default_ttl,
            sweeper.is_some()
        );

        Self {
            inner: Arc::new(Inner {
                store,
                clock,
                sweeper: std::sync::Mutex::new(sweeper),
                closed: AtomicBool::new(false),
            }),
        }
    }

    // == Single-Key Operations ==
    /// Returns the value for `key` if present and not expired, marking it
    /// most recently used.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut store = self.inner.store.lock().await;
        store.get(key, self.now()).cloned()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn set(&self, key: impl Into<String>, value: V, options: SetOptions) {
        let mut store = self.inner.store.lock().await;
        store.set(key, value, &options, self.now());
    }

    /// Removes `key`. Returns true if a live entry was removed.
    pub async fn delete(&self, key: &str) -> bool {
        let mut store = self.inner.store.lock().await;
        store.delete(key, self.now())
    }

    /// Returns true if `key` holds a live entry. Does not affect LRU order.
    pub async fn has(&self, key: &str) -> bool {
        let mut store = self.inner.store.lock().await;
        store.has(key, self.now())
    }

    // == Batch Operations ==
    /// Looks up several keys at once. Misses are left out of the result.
    pub async fn get_many<K: AsRef<str>>(&self, keys: &[K]) -> HashMap<String, V> {
        let mut store = self.inner.store.lock().await;
        store.get_many(keys, self.now())
    }

    /// Stores every pair with the same options. An empty batch does nothing.
    pub async fn set_many<I>(&self, entries: I, options: SetOptions)
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let mut store = self.inner.store.lock().await;
        store.set_many(entries, &options, self.now());
    }

    /// Removes several keys and returns how many were actually present.
    pub async fn delete_many<K: AsRef<str>>(&self, keys: &[K]) -> usize {
        let mut store = self.inner.store.lock().await;
        store.delete_many(keys, self.now())
    }

    // == Compute If Absent ==
    /// Returns the cached value for `key`, or awaits `factory`, caches its
    /// result and returns it.
    ///
    /// The factory runs without holding the cache lock. If it fails, the
    /// error is returned unchanged and nothing is written.
    pub async fn get_or_set<F, Fut, E>(
        &self,
        key: &str,
        factory: F,
        options: SetOptions,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let value = factory().await?;
        self.set(key, value.clone(), options).await;
        Ok(value)
    }

    /// Synchronous-factory variant of [`Cache::get_or_set`].
    pub async fn get_or_set_with<F, E>(
        &self,
        key: &str,
        factory: F,
        options: SetOptions,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.get_or_set(key, || std::future::ready(factory()), options)
            .await
    }

    // == Invalidation ==
    /// Removes every entry tagged with `tag`. Returns how many were removed;
    /// an unknown tag is simply a no-op.
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let mut store = self.inner.store.lock().await;
        store.invalidate_tag(tag)
    }

    /// Empties the cache and its tag index in one step.
    pub async fn clear(&self) {
        let removed = self.inner.store.lock().await.clear();
        warn!("Cache cleared: {} entries dropped", removed);
    }

    /// Runs an expiry sweep right away. Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut store = self.inner.store.lock().await;
        store.sweep_expired(self.now())
    }

    // == Lifecycle ==
    /// Stops the background sweep and empties the cache.
    ///
    /// Safe to call more than once. The handle stays usable afterwards as an
    /// empty cache without a sweep.
    pub async fn close(&self) {
        let first_close = !self.inner.closed.swap(true, Ordering::SeqCst);

        if let Some(handle) = self.inner.take_sweeper() {
            handle.abort();
        }
        let removed = self.inner.store.lock().await.clear();

        if first_close {
            info!("Cache closed: {} entries dropped", removed);
        }
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    // == Introspection ==
    /// Number of stored entries, including expired ones not yet reclaimed.
    pub async fn len(&self) -> usize {
        self.inner.store.lock().await.len()
    }

    /// Returns true if nothing is stored. Like `len`, this does not reclaim
    /// expired entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.store.lock().await.is_empty()
    }

    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.store.lock().await.stats()
    }

    fn now(&self) -> u64 {
        self.inner.clock.now_ms()
    }

    #[cfg(test)]
    fn has_sweeper(&self) -> bool {
        self.inner
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
