//! rescache - A declarative HTTP resource layer with response caching
//!
//! Operations are described as plain descriptors, built into callable form,
//! and served through a shared TTL cache that mutations invalidate by
//! pattern.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod resource;
pub mod tasks;
pub mod transport;

pub use cache::{CacheStats, CacheStore, DEFAULT_CACHE_TTL_MS};
pub use clock::{Clock, SystemClock};
pub use config::ResourceConfig;
pub use error::{ResourceError, Result};
pub use resource::{
    CallArgs, CallOptions, Method, Operation, OperationDescriptor, Resource, ResourceBuilder,
};
pub use tasks::spawn_purge_task;
pub use transport::{HttpTransport, Transport};
