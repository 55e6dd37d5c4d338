//! Expiry Policy Module
//!
//! Pure functions turning a TTL in seconds into an absolute expiration
//! timestamp and checking timestamps against the current time.

/// Picks the TTL that applies to a write.
///
/// An explicit TTL always wins, including an explicit `0`; otherwise the
/// configured default is used.
pub fn resolve_ttl(ttl: Option<i64>, default_ttl: Option<i64>) -> Option<i64> {
    ttl.or(default_ttl)
}

/// Computes the absolute expiration (Unix milliseconds) for a TTL in seconds.
///
/// - `None` or `Some(0)` never expires.
/// - A negative TTL lands at or before `now_ms`, so the entry reads as expired
///   on the very next check.
pub fn expires_at_from_ttl(now_ms: u64, ttl_secs: Option<i64>) -> Option<u64> {
    match ttl_secs {
        None | Some(0) => None,
        Some(secs) => Some(now_ms.saturating_add_signed(secs.saturating_mul(1000))),
    }
}

/// Returns true when `expires_at` is set and `now_ms` has reached it.
///
/// The boundary is inclusive: an entry expiring at `t` is gone at `t`.
pub fn is_expired_at(expires_at: Option<u64>, now_ms: u64) -> bool {
    match expires_at {
        Some(expires) => now_ms >= expires,
        None => false,
    }
}
