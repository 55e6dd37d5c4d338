//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and tag support.

use std::collections::HashSet;

use crate::cache::expiry;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Recency is not stored here; it lives in the store-wide `LruTracker`.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
    /// Tags attached at write time
    pub tags: HashSet<String>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now_ms` - Write time (Unix milliseconds)
    /// * `ttl_seconds` - Resolved TTL in seconds; `None` or `0` never expires
    /// * `tags` - Tags to attach
    pub fn new(value: V, now_ms: u64, ttl_seconds: Option<i64>, tags: HashSet<String>) -> Self {
        Self {
            value,
            expires_at: expiry::expires_at_from_ttl(now_ms, ttl_seconds),
            tags,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: an entry is expired once the current time is greater
    /// than or equal to its expiration time.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        expiry::is_expired_at(self.expires_at, now_ms)
    }

    /// Returns true if the entry carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
