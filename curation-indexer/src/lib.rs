//! # Curation Indexer
//!
//! Main library for the curation indexer.
//!
//! This crate provides the configuration, wiring and batch entry point for
//! running the curation indexer pipeline.

pub mod config;

pub use config::{Dependencies, IndexerSettings};

use curation_indexer_pipeline::orchestrator::BatchProcessor;
use curation_indexer_shared::{BatchResponse, QueueBatch};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] curation_indexer_pipeline::PipelineError),

    /// Batch input or output could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Parse a queue batch document and run it through the processor.
pub async fn process_batch_json(
    processor: &BatchProcessor,
    input: &str,
) -> Result<BatchResponse, IndexingError> {
    let batch: QueueBatch = serde_json::from_str(input)?;
    info!(record_count = batch.records.len(), "Received queue batch");

    Ok(processor.process_records(&batch.records).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use curation_indexer_pipeline::compiler::CommandCompiler;
    use curation_indexer_pipeline::config::{GradeRankTable, LanguageIndexTable};
    use curation_indexer_pipeline::resolver::{CrossReferenceResolver, NoDelay};
    use curation_indexer_pipeline::validator::EventValidator;
    use curation_indexer_repository::{
        BulkIndexClient, BulkIndexConfig, BulkIndexError, BulkIndexProvider, BulkRequest,
        BulkResponse, ContentGraphError, ContentGraphProvider,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Backend that accepts every operation as created.
    struct AcceptAll {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BulkIndexProvider for AcceptAll {
        async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, BulkIndexError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let items: Vec<_> = (0..request.operation_count())
                .map(|_| json!({ "index": { "status": 201, "result": "created" } }))
                .collect();
            Ok(serde_json::from_value(json!({ "took": 1, "errors": false, "items": items })).unwrap())
        }

        async fn health_check(&self) -> Result<bool, BulkIndexError> {
            Ok(true)
        }
    }

    struct EmptyGraph;

    #[async_trait]
    impl ContentGraphProvider for EmptyGraph {
        async fn collection_id_by_slug(&self, _slug: &str) -> Result<Option<String>, ContentGraphError> {
            Ok(None)
        }

        async fn corpus_item_id_by_url(&self, _url: &str) -> Result<Option<String>, ContentGraphError> {
            Ok(None)
        }
    }

    fn processor(calls: Arc<AtomicUsize>) -> BatchProcessor {
        BatchProcessor::new(
            EventValidator::new(LanguageIndexTable::default()),
            CrossReferenceResolver::new(Arc::new(EmptyGraph), Arc::new(NoDelay)),
            CommandCompiler::new(GradeRankTable::default()),
            BulkIndexClient::with_config(Box::new(AcceptAll { calls }), BulkIndexConfig::no_retries()),
        )
    }

    #[tokio::test]
    async fn test_process_batch_json() {
        let calls = Arc::new(AtomicUsize::new(0));
        let processor = processor(calls.clone());

        let body = json!({
            "detail-type": "add-approved-item",
            "detail": { "approvedItem": { "externalId": "aaaaa", "url": "http://some-url.com", "language": "en" } }
        });
        let bad_language = json!({
            "detail-type": "add-approved-item",
            "detail": { "approvedItem": { "externalId": "bbbbb", "url": "http://other.com", "language": "not-language-code" } }
        });
        let input = json!({
            "Records": [
                { "messageId": "m-1", "body": body.to_string() },
                { "messageId": "m-2", "body": bad_language.to_string() }
            ]
        })
        .to_string();

        let response = process_batch_json(&processor, &input).await.unwrap();

        assert_eq!(response.message_ids(), vec!["m-2"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "batchItemFailures": [{ "itemIdentifier": "m-2" }] })
        );
    }

    #[tokio::test]
    async fn test_invalid_batch_document() {
        let processor = processor(Arc::new(AtomicUsize::new(0)));

        let result = process_batch_json(&processor, "[not a batch").await;

        assert!(matches!(result, Err(IndexingError::SerializationError(_))));
    }
}
