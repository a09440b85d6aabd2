//! Content graph error types.

use thiserror::Error;

/// Errors that can occur while querying the content graph.
#[derive(Debug, Clone, Error)]
pub enum ContentGraphError {
    /// The request could not be sent or timed out.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The service answered with a non-success status.
    #[error("Content graph returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The service answered with GraphQL errors.
    #[error("GraphQL error: {0}")]
    GraphQlError(String),

    /// The response body could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ContentGraphError {
    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    /// Create a GraphQL error.
    pub fn graphql(msg: impl Into<String>) -> Self {
        Self::GraphQlError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
