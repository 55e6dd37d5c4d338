//! Cache Options Module
//!
//! Construction-time configuration and per-write options.

/// Default sweep interval when none is configured.
pub const DEFAULT_CLEANUP_INTERVAL_MS: i64 = 60_000;

// == Cache Config ==
/// Settings fixed when a cache is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Capacity bound; `None` or `Some(0)` means unbounded
    pub max_size: Option<usize>,
    /// TTL in seconds for writes that do not carry one
    pub default_ttl: Option<i64>,
    /// Milliseconds between background sweeps; zero or negative disables them
    pub cleanup_interval_ms: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: None,
            default_ttl: None,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn default_ttl(mut self, seconds: i64) -> Self {
        self.default_ttl = Some(seconds);
        self
    }

    pub fn cleanup_interval_ms(mut self, ms: i64) -> Self {
        self.cleanup_interval_ms = ms;
        self
    }

    /// Turns the background sweep off; lazy expiry still applies.
    pub fn without_sweep(self) -> Self {
        self.cleanup_interval_ms(0)
    }

    /// The effective capacity bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.max_size.filter(|&n| n > 0)
    }

    /// The sweep period, or `None` when sweeping is disabled.
    pub fn sweep_interval_ms(&self) -> Option<u64> {
        u64::try_from(self.cleanup_interval_ms)
            .ok()
            .filter(|&ms| ms > 0)
    }
}

// == Set Options ==
/// Options shared by `set`, `set_many` and `get_or_set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// TTL in seconds; `None` falls back to the cache default, `Some(0)` never
    /// expires
    pub ttl: Option<i64>,
    /// Tags attached to the written entries
    pub tags: Vec<String>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with only a TTL.
    pub fn ttl(seconds: i64) -> Self {
        Self {
            ttl: Some(seconds),
            tags: Vec::new(),
        }
    }

    /// Options with only tags.
    pub fn tagged<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with_tags(tags)
    }

    pub fn with_ttl(mut self, seconds: i64) -> Self {
        self.ttl = Some(seconds);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}
