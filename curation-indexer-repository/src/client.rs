//! Bulk index client implementation.
//!
//! This module provides the client the pipeline uses to submit bulk
//! requests. It wraps a `BulkIndexProvider` with the retry policy: bounded
//! retries, exponential backoff with jitter, and retries only for transient
//! failures.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::BulkIndexConfig;
use crate::errors::BulkIndexError;
use crate::interfaces::BulkIndexProvider;
use crate::types::{BulkRequest, BulkResponse};

/// The client the pipeline uses to write to the search backend.
pub struct BulkIndexClient {
    provider: Box<dyn BulkIndexProvider>,
    config: BulkIndexConfig,
}

impl BulkIndexClient {
    /// Create a new BulkIndexClient with the default retry policy.
    pub fn new(provider: Box<dyn BulkIndexProvider>) -> Self {
        Self {
            provider,
            config: BulkIndexConfig::default(),
        }
    }

    /// Create a new BulkIndexClient with a custom retry policy.
    pub fn with_config(provider: Box<dyn BulkIndexProvider>, config: BulkIndexConfig) -> Self {
        Self { provider, config }
    }

    /// Submit a bulk request, retrying transient failures.
    ///
    /// An empty request is answered locally without contacting the backend.
    /// Once retries are exhausted, or on a non-retryable error, the last
    /// error is returned.
    pub async fn submit(&self, request: &BulkRequest) -> Result<BulkResponse, BulkIndexError> {
        if request.is_empty() {
            return Ok(BulkResponse::empty());
        }

        let mut attempt: u32 = 0;
        loop {
            match self.provider.bulk(request).await {
                Ok(response) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt,
                            operations = request.operation_count(),
                            "Bulk request succeeded after retry"
                        );
                    }
                    return Ok(response);
                }
                Err(e) => {
                    if !e.is_retryable() {
                        debug!(error = %e, "Non-retryable error encountered");
                        return Err(e);
                    }

                    if attempt >= self.config.max_retries {
                        warn!(
                            attempts = attempt + 1,
                            error = %e,
                            "Bulk request failed, retries exhausted"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Bulk request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Check if the search backend is healthy.
    pub async fn health_check(&self) -> Result<bool, BulkIndexError> {
        self.provider.health_check().await
    }

    /// Delay before retry number `attempt + 1`.
    ///
    /// The exponential base is capped at `max_retry_delay_ms`; half of it is
    /// fixed and the other half is randomised.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self
            .config
            .initial_retry_delay_ms
            .saturating_mul(1u64 << attempt.min(32))
            .min(self.config.max_retry_delay_ms);
        let half = base / 2;
        let jitter = if half > 0 {
            rand::thread_rng().gen_range(0..=half)
        } else {
            0
        };
        Duration::from_millis(base - half + jitter)
    }
}
