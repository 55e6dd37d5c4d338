//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction and tag-based
//! invalidation.

mod clock;
mod entry;
pub mod expiry;
mod handle;
mod lru;
mod options;
mod stats;
mod store;
mod tags;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use handle::Cache;
pub use lru::LruTracker;
pub use options::{CacheConfig, SetOptions, DEFAULT_CLEANUP_INTERVAL_MS};
pub use stats::CacheStats;
pub use store::EntryStore;
pub use tags::TagIndex;
