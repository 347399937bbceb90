//! Error types for the resource client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Resource Error Enum ==
/// Unified error type for the resource client.
///
/// Cache operations never produce errors: a cache-layer problem degrades to
/// a miss. Everything that can fail a call is one of these.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A URL template placeholder had no usable call-time value
    #[error("Missing parameter for placeholder :{0}")]
    MissingParameter(String),

    /// Network failure (no status) or non-success HTTP status
    #[error("Transport failure: {message}")]
    Transport {
        /// HTTP status code, absent when the request never completed
        status: Option<u16>,
        /// Human-readable failure description
        message: String,
    },

    /// Malformed operation descriptor, rejected when the resource is built
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Call addressed to an operation name the builder never saw
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl ResourceError {
    /// Returns the HTTP status code for transport failures that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResourceError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the resource client.
pub type Result<T> = std::result::Result<T, ResourceError>;
