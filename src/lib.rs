//! tagcache - An in-process cache engine
//!
//! Key/value caching with LRU capacity eviction, per-entry TTL expiry,
//! tag-based bulk invalidation and a background expiry sweep, plus an
//! optional HTTP surface over a single configured cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheConfig, SetOptions};
pub use config::Config;
