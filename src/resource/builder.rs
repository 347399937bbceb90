//! Resource Builder Module
//!
//! Turns a set of named descriptors into a [`Resource`]: a group of callable
//! operations wired to one shared transport, cache, and clock. Descriptors
//! are validated up front so a misconfigured group fails at build time, not
//! on first call.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::CacheStore;
use crate::clock::{Clock, SystemClock};
use crate::config::ResourceConfig;
use crate::error::{ResourceError, Result};
use crate::resource::call::{CallArgs, CallOptions};
use crate::resource::descriptor::OperationDescriptor;
use crate::resource::operation::{Operation, SharedState};
use crate::transport::{HttpTransport, Transport};

// == Resource Builder ==
/// Assembles a [`Resource`] from a group config and named descriptors.
///
/// The transport and clock default to the real ones; tests inject doubles
/// through [`transport`](ResourceBuilder::transport) and
/// [`clock`](ResourceBuilder::clock).
#[derive(Debug)]
pub struct ResourceBuilder {
    config: ResourceConfig,
    descriptors: BTreeMap<String, OperationDescriptor>,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ResourceBuilder {
    /// Starts a builder for one group of operations.
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            descriptors: BTreeMap::new(),
            transport: None,
            clock: None,
        }
    }

    /// Registers a descriptor under `name`.
    ///
    /// Registering the same name again replaces the earlier descriptor.
    pub fn operation(mut self, name: impl Into<String>, descriptor: OperationDescriptor) -> Self {
        self.descriptors.insert(name.into(), descriptor);
        self
    }

    /// Registers every descriptor from an iterator, typically a map
    /// deserialized from JSON.
    pub fn operations<I>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = (String, OperationDescriptor)>,
    {
        self.descriptors.extend(descriptors);
        self
    }

    /// Substitutes the transport all operations send through.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Substitutes the clock the cache reads time from.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    // == Build ==
    /// Validates the group config and every descriptor, then produces the
    /// callable group.
    ///
    /// Fails with [`ResourceError::Configuration`] on an empty operation
    /// name, an empty url, or a zero TTL, whether per-operation or as the
    /// group default.
    pub fn build(self) -> Result<Resource> {
        let Self {
            config,
            descriptors,
            transport,
            clock,
        } = self;

        if let Some(message) = config.validate() {
            return Err(ResourceError::Configuration(message));
        }

        for (name, descriptor) in &descriptors {
            if name.is_empty() {
                return Err(ResourceError::Configuration(
                    "Operation name cannot be empty".to_string(),
                ));
            }
            if let Some(message) = descriptor.validate() {
                return Err(ResourceError::Configuration(format!(
                    "Operation '{}': {}",
                    name, message
                )));
            }
        }

        let transport = transport.unwrap_or_else(|| Arc::new(HttpTransport::new()));
        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock));
        let cache = Arc::new(RwLock::new(CacheStore::new(clock)));

        let shared = Arc::new(SharedState {
            base_url: config.base_url.clone(),
            transport,
            cache: Arc::clone(&cache),
        });

        let operations: BTreeMap<String, Operation> = descriptors
            .into_iter()
            .map(|(name, descriptor)| {
                let operation =
                    Operation::new(name.clone(), descriptor, &config, Arc::clone(&shared));
                (name, operation)
            })
            .collect();

        info!("built resource group with {} operations", operations.len());

        Ok(Resource { operations, cache })
    }
}

// == Resource ==
/// A built group of operations sharing one cache and transport.
#[derive(Debug)]
pub struct Resource {
    operations: BTreeMap<String, Operation>,
    cache: Arc<RwLock<CacheStore>>,
}

impl Resource {
    /// Looks up an operation by the name it was registered under.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Invokes the named operation.
    ///
    /// Fails with [`ResourceError::UnknownOperation`] if no descriptor was
    /// registered under `name`.
    pub async fn call(&self, name: &str, args: CallArgs, options: CallOptions) -> Result<Value> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| ResourceError::UnknownOperation(name.to_string()))?;
        operation.call(args, options).await
    }

    /// Registered operation names in sorted order.
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }

    /// Handle to the group's cache, for stats inspection and the
    /// background purge task.
    pub fn cache(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.cache)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if no operations were registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
