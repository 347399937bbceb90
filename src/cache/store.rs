//! Cache Store Module
//!
//! In-memory response cache with TTL expiry and pattern-based eviction.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};
use crate::clock::Clock;

// == Cache Store ==
/// In-memory store mapping derived keys to cached response payloads.
///
/// Never rejects an operation: unknown and expired keys read as absent and
/// writes always succeed, overwriting any previous entry for the same key.
/// Entries leave the store only through TTL expiry (observed lazily on read,
/// or eagerly via [`purge_expired`](CacheStore::purge_expired)) and explicit
/// pattern eviction; there is no capacity bound.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance counters
    stats: CacheStats,
    /// Time source for expiry decisions
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` if the key is
    /// unknown or its entry has expired.
    ///
    /// An expired entry is removed on observation and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(now) {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                debug!("cache entry expired: {}", key);
                return None;
            }

            let remaining = entry.ttl_remaining_ms(now);
            let value = entry.value.clone();
            self.stats.record_hit();
            debug!("cache hit: {} ({}ms remaining)", key, remaining);
            Some(value)
        } else {
            self.stats.record_miss();
            debug!("cache miss: {}", key);
            None
        }
    }

    // == Put ==
    /// Stores `value` under `key`, expiring `ttl_ms` milliseconds from now.
    ///
    /// An existing entry for the same key is overwritten; the newer write
    /// wins.
    pub fn put(&mut self, key: String, value: Value, ttl_ms: u64) {
        let now = self.clock.now();
        debug!("cache store: {} (ttl {}ms)", key, ttl_ms);
        self.entries.insert(key, CacheEntry::new(value, now, ttl_ms));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict Matching ==
    /// Removes every entry whose key matches any of `patterns`.
    ///
    /// A pattern matches a key when it occurs as a substring, or when it
    /// compiles as a regex and matches anywhere in the key. A pattern that
    /// fails to compile still participates as a plain substring; eviction
    /// never fails.
    ///
    /// Returns whether any entry was removed.
    pub fn evict_matching(&mut self, patterns: &[String]) -> bool {
        let mut removed: u64 = 0;

        for pattern in patterns {
            let regex = Regex::new(pattern).ok();
            let matched: Vec<String> = self
                .entries
                .keys()
                .filter(|key| key_matches(key.as_str(), pattern, regex.as_ref()))
                .cloned()
                .collect();

            for key in matched {
                self.entries.remove(&key);
                removed += 1;
            }
        }

        if removed > 0 {
            self.stats.record_evictions(removed);
            self.stats.set_total_entries(self.entries.len());
            debug!("evicted {} cache entries", removed);
        }
        removed > 0
    }

    // == Purge Expired ==
    /// Eagerly removes all expired entries.
    ///
    /// Returns the number of entries removed. Expiry is already enforced
    /// lazily on read; purging only reclaims memory sooner.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.entries.remove(&key);
        }

        if count > 0 {
            self.stats.record_evictions(count as u64);
        }
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of physically present entries (expired included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Pattern Matching ==
/// Substring-or-regex pattern test against one key.
fn key_matches(key: &str, pattern: &str, regex: Option<&Regex>) -> bool {
    if key.contains(pattern) {
        return true;
    }
    regex.map(|re| re.is_match(key)).unwrap_or(false)
}
