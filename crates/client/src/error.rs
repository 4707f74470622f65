//! Client-layer error model.

use thiserror::Error;

use saleflow_fulfillment::ValidationError;

/// Result type used across the client layer.
pub type ClientResult<T> = Result<T, ClientError>;

/// Why a client operation failed.
///
/// Every variant is surfaced to the user and none is retried automatically.
/// A `Backend` rejection is authoritative: it overrides whatever the local
/// validator concluded, since the backend sees purchases this client has not
/// fetched yet.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// The local pre-flight validator blocked the submission; nothing was sent.
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    /// The backend rejected the request; its message is passed through
    /// unchanged.
    #[error("backend rejected the request: {message}")]
    Backend { message: String },

    /// The request never produced a backend verdict.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
