//! Cache Module
//!
//! Response caching: canonical key derivation, TTL-bounded entries, the
//! in-memory store, and its performance counters.

mod entry;
mod key;
mod stats;
mod store;


pub use entry::CacheEntry;
pub use key::derive_key;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Default time-to-live applied to cached responses: ten minutes.
pub const DEFAULT_CACHE_TTL_MS: u64 = 600_000;
