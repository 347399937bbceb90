//! Operation Descriptor Module
//!
//! Declarative description of one HTTP operation: where it goes, how it is
//! sent, and how its responses interact with the cache. Descriptors are
//! plain data and can be written in code or deserialized from JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::config::ResourceConfig;

// == HTTP Method ==
/// Request method of an operation.
///
/// `Get` is the only method whose responses are cached; the others are
/// mutations and may carry invalidation patterns instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns true for the read method whose responses enter the cache.
    pub fn is_cacheable(self) -> bool {
        matches!(self, Method::Get)
    }

    /// Uppercase wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Operation Descriptor ==
/// Declarative definition of a single operation.
///
/// The `url` may contain `:name` placeholder tokens filled in from caller
/// arguments at call time. `params` optionally renames a placeholder to a
/// differently-named caller argument; placeholders absent from the map take
/// their argument under their own name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperationDescriptor {
    /// Path template, possibly containing `:name` placeholders
    pub url: String,
    /// HTTP method the operation is sent with
    pub method: Method,
    /// Placeholder-to-argument renames for the path template
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Headers attached to every call of this operation
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Whether GET calls read from the cache before hitting the transport
    #[serde(default)]
    pub use_cache: Option<bool>,
    /// TTL in milliseconds for responses this operation caches
    #[serde(default)]
    pub cache_ttl_ms: Option<u64>,
    /// Cache-key patterns evicted after this operation mutates successfully
    #[serde(default)]
    pub invalidates: Vec<String>,
}

impl OperationDescriptor {
    /// Creates a descriptor for `method` requests against `url`.
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            params: BTreeMap::new(),
            headers: BTreeMap::new(),
            use_cache: None,
            cache_ttl_ms: None,
            invalidates: Vec::new(),
        }
    }

    /// Renames the placeholder `token` to the caller argument `argument`.
    pub fn with_param(mut self, token: impl Into<String>, argument: impl Into<String>) -> Self {
        self.params.insert(token.into(), argument.into());
        self
    }

    /// Attaches a default header sent with every call.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Opts this operation's GET calls in or out of cache reads.
    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    /// Overrides the TTL applied to responses this operation caches.
    pub fn with_cache_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.cache_ttl_ms = Some(ttl_ms);
        self
    }

    /// Sets the cache-key patterns evicted after a successful mutation.
    pub fn with_invalidates<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalidates = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the descriptor data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub(crate) fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("Url cannot be empty".to_string());
        }
        if self.cache_ttl_ms == Some(0) {
            return Some("Cache TTL must be greater than zero".to_string());
        }
        None
    }

    /// Resolves whether cache reads apply, layering descriptor over group
    /// default over off.
    pub(crate) fn effective_use_cache(&self, config: &ResourceConfig) -> bool {
        self.use_cache
            .or(config.default_use_cache)
            .unwrap_or(false)
    }

    /// Resolves the TTL, layering descriptor over group default over the
    /// crate-wide ten-minute fallback.
    pub(crate) fn effective_ttl_ms(&self, config: &ResourceConfig) -> u64 {
        self.cache_ttl_ms
            .or(config.default_cache_ttl_ms)
            .unwrap_or(crate::cache::DEFAULT_CACHE_TTL_MS)
    }
}
