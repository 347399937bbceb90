//! Operation Module
//!
//! The callable form of a descriptor. An [`Operation`] closes over the
//! group's shared transport and cache: GET calls consult and repopulate the
//! cache, mutation calls go straight through and evict matching entries
//! after they succeed.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use url::form_urlencoded;

use crate::cache::{derive_key, CacheStore};
use crate::config::ResourceConfig;
use crate::error::Result;
use crate::resource::call::{CallArgs, CallOptions};
use crate::resource::descriptor::{Method, OperationDescriptor};
use crate::resource::template::resolve_template;
use crate::transport::Transport;

// == Shared State ==
/// State every operation of one built group closes over.
#[derive(Debug)]
pub(crate) struct SharedState {
    /// Prefix prepended to every resolved path
    pub(crate) base_url: String,
    /// HTTP boundary all calls go through
    pub(crate) transport: Arc<dyn Transport>,
    /// Response cache shared by the whole group
    pub(crate) cache: Arc<RwLock<CacheStore>>,
}

// == Operation ==
/// A named, callable HTTP operation produced by the builder.
///
/// Cloning is cheap; clones share the same descriptor, transport, and
/// cache.
#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    descriptor: Arc<OperationDescriptor>,
    use_cache: bool,
    cache_ttl_ms: u64,
    shared: Arc<SharedState>,
}

impl Operation {
    /// Binds a descriptor to the group's shared state, resolving its cache
    /// settings against the group config.
    pub(crate) fn new(
        name: String,
        descriptor: OperationDescriptor,
        config: &ResourceConfig,
        shared: Arc<SharedState>,
    ) -> Self {
        let use_cache = descriptor.effective_use_cache(config);
        let cache_ttl_ms = descriptor.effective_ttl_ms(config);
        Self {
            name,
            descriptor: Arc::new(descriptor),
            use_cache,
            cache_ttl_ms,
            shared,
        }
    }

    /// Name the operation was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTP method this operation sends.
    pub fn method(&self) -> Method {
        self.descriptor.method
    }

    // == Call ==
    /// Invokes the operation with the given arguments and overrides.
    ///
    /// Resolves the path template, then either serves a GET through the
    /// cache or sends a mutation and evicts whatever it invalidates. Header
    /// overrides replace the descriptor's default headers entirely and
    /// participate in the cache key.
    pub async fn call(&self, args: CallArgs, options: CallOptions) -> Result<Value> {
        let path = resolve_template(&self.descriptor.url, &args.params, &self.descriptor.params)?;
        let headers = options.headers.as_ref().unwrap_or(&self.descriptor.headers);
        let url = build_url(&self.shared.base_url, &path, &args.query);

        debug!("{} {} ({})", self.descriptor.method, url, self.name);

        if self.descriptor.method.is_cacheable() {
            let use_cache = options.use_cache.unwrap_or(self.use_cache);
            self.fetch_with_cache(&path, &url, &args.query, headers, use_cache)
                .await
        } else {
            self.mutate(&url, args.body.as_ref(), headers).await
        }
    }

    // == Cached Fetch ==
    /// GET path: optionally read the cache, otherwise fetch and store.
    ///
    /// The fetched response is written back unconditionally; `use_cache`
    /// only gates the read. The lock is released while the request is in
    /// flight, so concurrent misses for the same key each fetch and the
    /// later write wins.
    async fn fetch_with_cache(
        &self,
        path: &str,
        url: &str,
        query: &BTreeMap<String, String>,
        headers: &BTreeMap<String, String>,
        use_cache: bool,
    ) -> Result<Value> {
        let key = derive_key(&self.name, path, query, headers);

        if use_cache {
            let mut cache = self.shared.cache.write().await;
            if let Some(value) = cache.get(&key) {
                return Ok(value);
            }
        }

        let value = self
            .shared
            .transport
            .send(Method::Get, url, None, headers)
            .await?;

        let mut cache = self.shared.cache.write().await;
        cache.put(key, value.clone(), self.cache_ttl_ms);
        Ok(value)
    }

    // == Mutation ==
    /// Non-GET path: send the request, then evict on success.
    ///
    /// A failed request leaves the cache untouched.
    async fn mutate(
        &self,
        url: &str,
        body: Option<&Value>,
        headers: &BTreeMap<String, String>,
    ) -> Result<Value> {
        let value = self
            .shared
            .transport
            .send(self.descriptor.method, url, body, headers)
            .await?;

        if !self.descriptor.invalidates.is_empty() {
            let mut cache = self.shared.cache.write().await;
            if cache.evict_matching(&self.descriptor.invalidates) {
                debug!("cache invalidated by {}", self.name);
            }
        }
        Ok(value)
    }
}

// == Url Assembly ==
/// Joins base, resolved path, and an encoded query string.
fn build_url(base: &str, path: &str, query: &BTreeMap<String, String>) -> String {
    let mut url = format!("{}{}", base, path);
    if !query.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }
    url
}
