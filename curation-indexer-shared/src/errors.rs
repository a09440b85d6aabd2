//! Decoding errors for inbound queue records.

use thiserror::Error;

/// Errors raised while turning a queue record into an [`IncomingEnvelope`].
///
/// [`IncomingEnvelope`]: crate::IncomingEnvelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The record body is not a valid event-bus document.
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// The detail does not have the shape its detail type requires.
    #[error("Invalid payload for {detail_type}: {reason}")]
    InvalidPayload { detail_type: String, reason: String },
}

impl DecodeError {
    /// Create an invalid body error.
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Create an invalid payload error.
    pub fn invalid_payload(detail_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            detail_type: detail_type.into(),
            reason: reason.into(),
        }
    }
}
