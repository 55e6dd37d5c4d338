//! Entry Store Module
//!
//! Single-threaded cache engine combining HashMap storage with LRU tracking,
//! TTL expiration and the tag index. Callers supply the current time, which
//! keeps every method deterministic; the thread-safe facade lives in
//! `handle.rs`.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::cache::{expiry, CacheConfig, CacheEntry, CacheStats, LruTracker, SetOptions, TagIndex};

// == Entry Store ==
/// Cache storage with LRU eviction, TTL expiry and tag invalidation.
///
/// Entries, recency order and the tag index are only ever changed together,
/// through `insert_entry` and `remove_entry`.
#[derive(Debug)]
pub struct EntryStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Tag to keys reverse index
    tags: TagIndex,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed, None = unbounded
    max_size: Option<usize>,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: Option<i64>,
}

impl<V> EntryStore<V> {
    // == Constructor ==
    /// Creates a new store.
    ///
    /// # Arguments
    /// * `max_size` - Capacity bound; `None` or `Some(0)` means unbounded
    /// * `default_ttl` - TTL in seconds for writes that do not carry one
    pub fn new(max_size: Option<usize>, default_ttl: Option<i64>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            tags: TagIndex::new(),
            stats: CacheStats::new(),
            max_size: max_size.filter(|&n| n > 0),
            default_ttl,
        }
    }

    /// Creates a store from a cache configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity(), config.default_ttl)
    }

    // == Liveness ==
    /// Returns true if `key` holds a live entry at `now_ms`.
    ///
    /// An expired entry is removed on the spot, together with its recency
    /// slot and tag memberships. Every read path and the sweep go through
    /// here.
    pub fn check_live(&mut self, key: &str, now_ms: u64) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now_ms),
            None => return false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expiration();
            debug!("Expired entry removed: {}", key);
            return false;
        }

        true
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Returns None if the key is absent or expired.
    pub fn get(&mut self, key: &str, now_ms: u64) -> Option<&V> {
        if !self.check_live(key, now_ms) {
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Checks for a live entry without changing recency.
    pub fn has(&mut self, key: &str, now_ms: u64) -> bool {
        self.check_live(key, now_ms)
    }

    // == Set ==
    /// Stores a value, replacing any live entry under the same key.
    ///
    /// Replacing a live key never evicts. A new key arriving at capacity
    /// evicts the least recently used entry first, whether or not that entry
    /// has expired.
    pub fn set(&mut self, key: impl Into<String>, value: V, options: &SetOptions, now_ms: u64) {
        let key = key.into();
        let ttl = expiry::resolve_ttl(options.ttl, self.default_ttl);
        let tags: HashSet<String> = options.tags.iter().cloned().collect();
        let entry = CacheEntry::new(value, now_ms, ttl, tags);

        if self.check_live(&key, now_ms) {
            if let Some(existing) = self.entries.get_mut(&key) {
                self.tags.retag(&key, &existing.tags, &entry.tags);
                *existing = entry;
            }
            self.lru.touch(&key);
        } else {
            self.make_room();
            self.insert_entry(key, entry);
        }
    }

    // == Delete ==
    /// Removes a live entry. Returns true if one was removed.
    ///
    /// An expired entry is cleaned up but reported as absent.
    pub fn delete(&mut self, key: &str, now_ms: u64) -> bool {
        if !self.check_live(key, now_ms) {
            return false;
        }
        self.remove_entry(key).is_some()
    }

    // == Batch Operations ==
    /// Applies `set` to each pair with one shared set of options.
    pub fn set_many<I>(&mut self, entries: I, options: &SetOptions, now_ms: u64)
    where
        I: IntoIterator<Item = (String, V)>,
    {
        for (key, value) in entries {
            self.set(key, value, options, now_ms);
        }
    }

    /// Deletes each key and returns how many live entries were removed.
    pub fn delete_many<K: AsRef<str>>(&mut self, keys: &[K], now_ms: u64) -> usize {
        keys.iter()
            .filter(|key| self.delete(key.as_ref(), now_ms))
            .count()
    }

    // == Invalidate Tag ==
    /// Removes every entry carrying `tag`, along with all of their other tag
    /// memberships. Returns the number of entries removed.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        let keys: Vec<String> = self
            .tags
            .keys(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default();

        let removed = keys
            .iter()
            .filter(|key| self.remove_entry(key).is_some())
            .count();
        self.tags.take(tag);

        if removed > 0 {
            self.stats.record_tag_invalidation();
            debug!("Tag '{}' invalidated: removed {} entries", tag, removed);
        }
        removed
    }

    // == Clear ==
    /// Empties the store and the tag index. Returns the number of entries
    /// dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.tags.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now_ms: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        expired_keys
            .iter()
            .filter(|key| !self.check_live(key, now_ms))
            .count()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones the
    /// sweep has not reclaimed yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored, expired or not.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys currently filed under `tag`, expired or not.
    pub fn tagged_keys(&self, tag: &str) -> Vec<String> {
        self.tags
            .keys(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Stored keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter_oldest_first().map(str::to_owned).collect()
    }

    // == Internal Helpers ==
    /// Evicts least recently used entries until a new key fits.
    fn make_room(&mut self) {
        let Some(max_size) = self.max_size else {
            return;
        };

        while self.entries.len() >= max_size {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            self.remove_entry(&victim);
            self.stats.record_eviction();
            debug!("Evicted least recently used entry: {}", victim);
        }
    }

    fn insert_entry(&mut self, key: String, entry: CacheEntry<V>) {
        self.tags.attach(&key, &entry.tags);
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.tags.detach(key, &entry.tags);
        self.stats.set_total_entries(self.entries.len());
        Some(entry)
    }

    /// Panics if the entry map, recency order and tag index disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.entries.len(), self.lru.len(), "LRU size mismatch");
        if let Some(max_size) = self.max_size {
            assert!(self.entries.len() <= max_size, "capacity exceeded");
        }
        for (key, entry) in &self.entries {
            assert!(self.lru.contains(key), "key '{}' missing from LRU", key);
            for tag in &entry.tags {
                assert!(self.tags.contains(tag, key), "key '{}' missing from tag '{}'", key, tag);
            }
        }
        for (tag, keys) in self.tags.iter() {
            assert!(!keys.is_empty(), "empty bucket for tag '{}'", tag);
            for key in keys {
                let entry = self.entries.get(key);
                assert!(
                    entry.is_some_and(|e| e.has_tag(tag)),
                    "stale key '{}' under tag '{}'",
                    key,
                    tag
                );
            }
        }
    }
}

impl<V: Clone> EntryStore<V> {
    /// Looks up each key with `get` semantics and returns only the hits.
    pub fn get_many<K: AsRef<str>>(&mut self, keys: &[K], now_ms: u64) -> HashMap<String, V> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = self.get(key, now_ms) {
                found.insert(key.to_string(), value.clone());
            }
        }
        found
    }
}
