//! Cache Entry Module
//!
//! A single cached response payload with its absolute expiry instant.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

// == Cache Entry ==
/// A cached response payload and the instant it stops being servable.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The raw response payload
    pub value: Value,
    /// Absolute expiry instant
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_ms` milliseconds after `now`.
    ///
    /// A TTL beyond the representable date range saturates to the far
    /// future instead of overflowing.
    pub fn new(value: Value, now: DateTime<Utc>, ttl_ms: u64) -> Self {
        let expires_at = i64::try_from(ttl_ms)
            .ok()
            .and_then(|ms| now.checked_add_signed(Duration::milliseconds(ms)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is readable only strictly before
    /// `expires_at`; once the clock reaches it the entry is logically absent.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds at `now`; zero once expired.
    pub fn ttl_remaining_ms(&self, now: DateTime<Utc>) -> u64 {
        let remaining = (self.expires_at - now).num_milliseconds();
        remaining.max(0) as u64
    }
}
