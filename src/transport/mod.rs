//! Transport Module
//!
//! The HTTP boundary. Operations talk to the network through the
//! [`Transport`] trait; the default implementation rides on `reqwest`, and
//! tests substitute an in-memory double.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::resource::Method;

mod http;

#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;

// == Transport Trait ==
/// Sends one HTTP request and returns the response body as JSON.
///
/// Implementations report every failure through
/// [`ResourceError::Transport`](crate::error::ResourceError::Transport):
/// connection problems with no status code, non-success responses with the
/// code the server returned.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Performs the request and parses the response body.
    ///
    /// An empty body parses as JSON `null`.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &BTreeMap<String, String>,
    ) -> Result<Value>;
}
