//! Bulk index error types.
//!
//! This module defines the error types that can occur while submitting a
//! bulk request to the search backend.

use thiserror::Error;

/// Errors that can occur during a bulk index call.
///
/// These describe the call as a whole. Per-operation failures reported by
/// the backend inside a successful response are not errors at this level;
/// they are carried in the [`BulkResponse`](crate::types::BulkResponse).
#[derive(Debug, Clone, Error)]
pub enum BulkIndexError {
    /// The request never completed (connection refused, timeout, TLS, ...).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend answered with a non-success status.
    #[error("Bulk request failed with status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The response body could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl BulkIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Only transport failures, throttling and server-side statuses qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) => true,
            Self::StatusError { status, .. } => *status == 429 || *status >= 500,
            Self::ParseError(_) | Self::ConfigurationError(_) => false,
        }
    }
}
