//! Bulk index provider trait definition.
//!
//! This module defines the abstract interface for the search backend's bulk
//! endpoint, allowing for different backend implementations (OpenSearch,
//! Elasticsearch, mocks).

use async_trait::async_trait;

use crate::errors::BulkIndexError;
use crate::types::{BulkRequest, BulkResponse};

/// Abstracts the underlying search backend.
///
/// Implementations are injected into [`BulkIndexClient`](crate::BulkIndexClient),
/// which adds the retry policy on top. A provider performs exactly one
/// attempt per call.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait BulkIndexProvider: Send + Sync {
    /// Send one bulk request.
    ///
    /// # Arguments
    ///
    /// * `request` - The assembled bulk request
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResponse)` - The backend accepted the request; individual
    ///   operations may still have failed and are reported per item
    /// * `Err(BulkIndexError)` - The call itself failed (transport error or
    ///   non-success status) and no per-operation outcome is known
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, BulkIndexError>;

    /// Check if the search backend is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the backend is healthy
    /// * `Ok(false)` - If the backend is reachable but unhealthy
    /// * `Err(BulkIndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, BulkIndexError>;
}
