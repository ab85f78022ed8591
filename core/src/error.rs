//! Error types for the Brainstem client.
//!
//! # Design
//! An API-level failure (non-2xx status) is `Rejected` and carries the parsed
//! response body exactly as the server sent it: an `{errors: [...]}` object,
//! a bare string, an array, whatever arrived. Transport failures are passed
//! through without inspection.

use serde_json::Value;

use crate::response;
use crate::transport::TransportError;

/// Errors returned by request operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status; holds the parsed body.
    #[error("request rejected: {0}")]
    Rejected(Value),

    /// The transport failed before a response was available.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The response body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The rejected response body, if this is an API-level failure.
    pub fn rejection(&self) -> Option<&Value> {
        match self {
            ApiError::Rejected(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_rejection(self) -> Option<Value> {
        match self {
            ApiError::Rejected(body) => Some(body),
            _ => None,
        }
    }

    /// `errors[].message` of a rejected Brainstem error body.
    ///
    /// Empty unless the rejection has an `errors` array.
    pub fn error_messages(&self) -> Vec<&str> {
        match self.rejection() {
            Some(body) if body.get("errors").is_some_and(Value::is_array) => {
                response::errors(body).into_iter().filter_map(Value::as_str).collect()
            }
            _ => Vec::new(),
        }
    }
}
