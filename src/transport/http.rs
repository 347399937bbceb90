//! HTTP Transport Module
//!
//! Default [`Transport`] implementation backed by a shared `reqwest` client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{ResourceError, Result};
use crate::resource::Method;
use crate::transport::Transport;

// == HTTP Transport ==
/// Sends requests over the network with `reqwest`.
///
/// The wrapped client pools connections, so one transport instance is
/// meant to be shared across all operations of a group.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Creates a transport reusing an already-configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &BTreeMap<String, String>,
    ) -> Result<Value> {
        debug!("{} {}", method, url);

        let mut request = self.client.request(to_reqwest_method(method), url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| ResourceError::Transport {
            status: None,
            message: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::Transport {
                status: Some(status.as_u16()),
                message: format!("HTTP {} for {}", status.as_u16(), url),
            });
        }

        let bytes = response.bytes().await.map_err(|err| ResourceError::Transport {
            status: Some(status.as_u16()),
            message: err.to_string(),
        })?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|err| ResourceError::Transport {
            status: Some(status.as_u16()),
            message: format!("Invalid JSON in response body: {}", err),
        })
    }
}

/// Maps the operation method onto the client's method type.
fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
