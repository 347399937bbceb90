//! In-memory transport double for unit tests.
//!
//! Records every request it receives and replies from a canned script, so
//! tests can assert on exactly what would have gone over the wire.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{ResourceError, Result};
use crate::resource::Method;
use crate::transport::Transport;

/// One request as the mock observed it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SentRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug)]
enum Reply {
    /// Always answer with a clone of this value
    Value(Value),
    /// Answer with `{"fetch": n}` where n counts calls from 1
    Counter,
    /// Always fail with this status and message
    Error(Option<u16>, String),
}

/// Scripted [`Transport`] that never touches the network.
#[derive(Debug)]
pub(crate) struct MockTransport {
    reply: Reply,
    calls: Mutex<Vec<SentRequest>>,
}

impl MockTransport {
    /// Mock that answers every request with `value`.
    pub fn returning(value: Value) -> Self {
        Self {
            reply: Reply::Value(value),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock whose answers number the requests, so a refetch is
    /// distinguishable from a cached read.
    pub fn counting() -> Self {
        Self {
            reply: Reply::Counter,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that fails every request.
    pub fn failing(status: Option<u16>, message: &str) -> Self {
        Self {
            reply: Reply::Error(status, message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of every request observed so far.
    pub fn calls(&self) -> Vec<SentRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &BTreeMap<String, String>,
    ) -> Result<Value> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(SentRequest {
                method,
                url: url.to_string(),
                body: body.cloned(),
                headers: headers.clone(),
            });
            calls.len()
        };

        match &self.reply {
            Reply::Value(value) => Ok(value.clone()),
            Reply::Counter => Ok(json!({ "fetch": call_number })),
            Reply::Error(status, message) => Err(ResourceError::Transport {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
