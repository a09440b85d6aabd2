//! Error types for the curation indexer pipeline.

use curation_indexer_repository::BulkIndexError;
use thiserror::Error;

/// Errors that abort a whole batch.
///
/// Anything that can be pinned to a single message is reported through the
/// failure list instead; these errors mean no per-message outcome is known
/// and the transport must redeliver every message.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The bulk call never completed successfully.
    #[error("Transport error: {0}")]
    TransportError(#[from] BulkIndexError),

    /// The bulk response does not line up with the request.
    #[error("Bulk response has {actual} items for {expected} operations")]
    ResponseMismatch { expected: usize, actual: usize },

    /// Static configuration could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PipelineError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
