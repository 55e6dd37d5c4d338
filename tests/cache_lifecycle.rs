//! Integration Tests for the Cache Library API
//!
//! Exercises a cache the way an embedding application would: one shared
//! handle, several tasks, a manual clock for expiry.

use std::convert::Infallible;
use std::time::Duration;

use tagcache::cache::{Cache, CacheConfig, ManualClock, SetOptions};

const START_MS: u64 = 1_700_000_000_000;

fn session_cache(clock: &ManualClock) -> Cache<String, ManualClock> {
    let config = CacheConfig::new()
        .max_size(3)
        .default_ttl(60)
        .without_sweep();
    Cache::with_clock(config, clock.clone())
}

#[tokio::test]
async fn test_session_lifecycle() {
    let clock = ManualClock::new(START_MS);
    let cache = session_cache(&clock);

    cache
        .set("session:a", "alice".to_string(), SetOptions::tagged(["user:1"]))
        .await;
    cache
        .set("session:b", "bob".to_string(), SetOptions::tagged(["user:2"]))
        .await;
    cache
        .set(
            "profile:a",
            "Alice A.".to_string(),
            SetOptions::ttl(0).with_tags(["user:1"]),
        )
        .await;

    // Logging user 1 out drops every entry carrying their tag.
    assert_eq!(cache.invalidate_tag("user:1").await, 2);
    assert!(!cache.has("session:a").await);
    assert!(!cache.has("profile:a").await);
    assert_eq!(cache.get("session:b").await.as_deref(), Some("bob"));

    // Default TTL applies to session:b, which was written without one.
    clock.advance(60_000);
    assert_eq!(cache.get("session:b").await, None);

    let stats = cache.stats().await;
    assert_eq!(stats.tag_invalidations, 1);
    assert_eq!(stats.expirations, 1);
    assert_eq!(stats.total_entries, 0);
}

#[tokio::test]
async fn test_capacity_eviction_respects_recent_reads() {
    let clock = ManualClock::new(START_MS);
    let cache = session_cache(&clock);

    cache
        .set_many(
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
            ],
            SetOptions::new(),
        )
        .await;

    // Reading "a" makes "b" the least recently used.
    assert!(cache.get("a").await.is_some());
    cache.set("d", "4".to_string(), SetOptions::new()).await;

    let found = cache.get_many(&["a", "b", "c", "d"]).await;
    assert_eq!(found.len(), 3);
    assert!(!found.contains_key("b"));
    assert_eq!(cache.stats().await.evictions, 1);
}

#[tokio::test]
async fn test_get_or_set_memoises_across_tasks() {
    let clock = ManualClock::new(START_MS);
    let cache = session_cache(&clock);

    let first = cache
        .get_or_set(
            "config",
            || async { Ok::<_, Infallible>("loaded".to_string()) },
            SetOptions::new(),
        )
        .await;
    assert_eq!(first.as_deref(), Ok("loaded"));

    let handle = {
        let cache = cache.clone();
        tokio::spawn(async move {
            cache
                .get_or_set_with(
                    "config",
                    || Err::<String, _>("factory should not run"),
                    SetOptions::new(),
                )
                .await
        })
    };
    assert_eq!(handle.await.unwrap().as_deref(), Ok("loaded"));
}

#[tokio::test]
async fn test_factory_error_leaves_cache_untouched() {
    let clock = ManualClock::new(START_MS);
    let cache = session_cache(&clock);

    let result = cache
        .get_or_set(
            "remote",
            || async { Err::<String, _>("backend unavailable") },
            SetOptions::new(),
        )
        .await;

    assert_eq!(result, Err("backend unavailable"));
    assert!(!cache.has("remote").await);
    assert!(cache.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_background_sweep_reclaims_expired_entries() {
    let clock = ManualClock::new(START_MS);
    let config = CacheConfig::new().cleanup_interval_ms(1_000);
    let cache: Cache<String, ManualClock> = Cache::with_clock(config, clock.clone());

    cache.set("short", "x".to_string(), SetOptions::ttl(1)).await;
    cache.set("forever", "y".to_string(), SetOptions::new()).await;
    clock.advance(1_000);

    // No read happens; only the sweep can reclaim "short".
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.stats().await.expirations, 1);
    cache.close().await;
}

#[tokio::test]
async fn test_close_is_idempotent_and_empties_cache() {
    let clock = ManualClock::new(START_MS);
    let cache = session_cache(&clock);
    cache.set("k", "v".to_string(), SetOptions::new()).await;

    cache.close().await;
    cache.close().await;

    assert!(cache.is_closed());
    assert!(cache.is_empty().await);
    assert_eq!(cache.get("k").await, None);
}
