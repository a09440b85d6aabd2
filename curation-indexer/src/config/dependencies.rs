//! Dependency initialization and wiring for the curation indexer.

use std::sync::Arc;
use tracing::info;

use crate::config::IndexerSettings;
use crate::IndexingError;
use curation_indexer_pipeline::{
    compiler::CommandCompiler,
    orchestrator::BatchProcessor,
    resolver::{CrossReferenceResolver, FixedDelay},
    validator::EventValidator,
};
use curation_indexer_repository::{BulkIndexClient, ContentGraphClient, OpenSearchProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured batch processor.
    pub processor: BatchProcessor,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// When `verify` is set the search backend must report itself healthy
    /// before the processor is handed out.
    pub async fn new(settings: &IndexerSettings, verify: bool) -> Result<Self, IndexingError> {
        info!(
            opensearch_url = %settings.opensearch.url,
            content_graph_url = %settings.content_graph.endpoint,
            language_count = settings.languages.len(),
            "Initializing dependencies"
        );

        // Initialize OpenSearch provider
        let provider = OpenSearchProvider::new(&settings.opensearch)
            .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch client: {}", e)))?;
        let client = BulkIndexClient::with_config(Box::new(provider), settings.bulk.clone());

        if verify {
            let healthy = client
                .health_check()
                .await
                .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

            if !healthy {
                return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
            }

            info!("OpenSearch connection verified");
        }

        // Initialize content graph client
        let graph = ContentGraphClient::new(&settings.content_graph).map_err(|e| {
            IndexingError::config(format!("Failed to create content graph client: {}", e))
        })?;

        let resolver = CrossReferenceResolver::new(
            Arc::new(graph),
            Arc::new(FixedDelay::new(settings.syndication_lookup_delay)),
        );

        let processor = BatchProcessor::new(
            EventValidator::new(settings.languages.clone()),
            resolver,
            CommandCompiler::new(settings.grades.clone()),
            client,
        );

        Ok(Self { processor })
    }
}
