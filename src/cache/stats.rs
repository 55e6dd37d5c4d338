//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! expirations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of entries removed because their TTL elapsed
    pub expirations: u64,
    /// Number of `invalidate_tag` calls that removed at least one entry
    pub tag_invalidations: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Lookups ==
    /// Counts a read that returned a live value.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a read that found nothing live.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Removals ==
    /// Counts an entry dropped to make room for a new key.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Counts an entry reclaimed because its TTL elapsed, whether found by a
    /// read or by the sweep.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    /// Counts an `invalidate_tag` call that removed at least one entry.
    pub fn record_tag_invalidation(&mut self) {
        self.tag_invalidations += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
