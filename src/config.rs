//! Configuration Module
//!
//! Group-level settings shared by all operations built from one descriptor
//! set: the base URL requests are issued against and fallback cache defaults
//! for descriptors that leave them unspecified.

use serde::Deserialize;

/// Settings applied to every operation in a built group.
///
/// Caching fields layer under the per-operation descriptor: a descriptor
/// value wins, then the group default, then the crate-wide fallback
/// (caching off, ten-minute TTL).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceConfig {
    /// Prefix prepended to every resolved operation path
    #[serde(default)]
    pub base_url: String,
    /// Group fallback for whether GET responses are read from cache
    #[serde(default)]
    pub default_use_cache: Option<bool>,
    /// Group fallback TTL in milliseconds for cached responses
    #[serde(default)]
    pub default_cache_ttl_ms: Option<u64>,
}

impl ResourceConfig {
    /// Creates a config rooted at `base_url` with no group cache defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_use_cache: None,
            default_cache_ttl_ms: None,
        }
    }

    /// Sets the group fallback for cache reads.
    pub fn with_default_use_cache(mut self, use_cache: bool) -> Self {
        self.default_use_cache = Some(use_cache);
        self
    }

    /// Sets the group fallback TTL in milliseconds.
    pub fn with_default_cache_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.default_cache_ttl_ms = Some(ttl_ms);
        self
    }

    /// Validates the group defaults.
    ///
    /// Returns an error message if validation fails, None if valid. A zero
    /// default TTL would leave every inherited entry expired on arrival.
    pub(crate) fn validate(&self) -> Option<String> {
        if self.default_cache_ttl_ms == Some(0) {
            return Some("Default cache TTL must be greater than zero".to_string());
        }
        None
    }
}
