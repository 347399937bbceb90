//! Call Arguments Module
//!
//! Per-call inputs to a built operation: path arguments, query string,
//! request body, and the optional overrides for headers and cache use.

use std::collections::BTreeMap;

use serde_json::Value;

// == Call Arguments ==
/// Inputs supplied by the caller for a single invocation.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    /// JSON request body, sent for mutation methods
    pub body: Option<Value>,
    /// Query-string pairs appended to the resolved path
    pub query: BTreeMap<String, String>,
    /// Arguments substituted into the path template's placeholders
    pub params: BTreeMap<String, Value>,
}

impl CallArgs {
    /// Creates empty call arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the JSON request body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a query-string pair.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Adds a path-template argument.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

// == Call Options ==
/// Per-call overrides applied on top of the operation's configuration.
///
/// Headers, when present, replace the operation's default header set
/// entirely rather than merging with it.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Replacement header set for this call only
    pub headers: Option<BTreeMap<String, String>>,
    /// Cache-read override for this call only
    pub use_cache: Option<bool>,
}

impl CallOptions {
    /// Creates options that override nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces cache reads on or off for this call.
    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    /// Adds a header to the replacement set for this call.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}
