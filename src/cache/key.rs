//! Cache Key Module
//!
//! Deterministic derivation of cache keys from a request's identity.
//!
//! A key is `operation|url|query|headers`, where query and headers are
//! rendered as sorted-key JSON objects. Sorted maps make insertion order
//! insignificant, and JSON escaping keeps distinct maps from colliding on
//! the separator characters. The operation name leads the key verbatim so
//! invalidation patterns can match it.

use std::collections::BTreeMap;

// == Key Derivation ==
/// Derives the canonical cache key for one request identity.
///
/// Pure and deterministic: identical inputs always produce the same key,
/// and any difference in query or headers produces a different key.
pub fn derive_key(
    operation: &str,
    url: &str,
    query: &BTreeMap<String, String>,
    headers: &BTreeMap<String, String>,
) -> String {
    let query_part = serde_json::to_string(query).unwrap_or_else(|_| "{}".to_string());
    let headers_part = serde_json::to_string(headers).unwrap_or_else(|_| "{}".to_string());
    format!("{}|{}|{}|{}", operation, url, query_part, headers_part)
}
