//! Orchestrator module for the curation indexer pipeline.
//!
//! Coordinates the validator, resolver, compiler, assembler and reconciler
//! for one queue batch.

use std::collections::HashSet;

use curation_indexer_repository::BulkIndexClient;
use curation_indexer_shared::{BatchResponse, IncomingEnvelope, QueueRecord};
use tracing::{error, info, instrument};

use crate::assembler::BulkRequestAssembler;
use crate::compiler::CommandCompiler;
use crate::consumer::{decode_records, ValidatedEnvelope};
use crate::errors::PipelineError;
use crate::reconciler::ResultReconciler;
use crate::resolver::CrossReferenceResolver;
use crate::validator::EventValidator;

/// Per-batch counters, logged once the batch is done.
#[derive(Debug, Default)]
struct BatchStats {
    received: usize,
    dropped: usize,
    invalid: usize,
    commands: usize,
    failed: usize,
}

/// Processor that handles one batch at a time.
///
/// The processor:
/// - Rejects envelopes that cannot be indexed before any network I/O
/// - Resolves cross-references sequentially
/// - Sends every command of the batch in a single bulk request
/// - Reports failures per message, never per document
pub struct BatchProcessor {
    validator: EventValidator,
    resolver: CrossReferenceResolver,
    compiler: CommandCompiler,
    assembler: BulkRequestAssembler,
    reconciler: ResultReconciler,
    client: BulkIndexClient,
}

impl BatchProcessor {
    /// Create a new processor with the given components.
    pub fn new(
        validator: EventValidator,
        resolver: CrossReferenceResolver,
        compiler: CommandCompiler,
        client: BulkIndexClient,
    ) -> Self {
        Self {
            validator,
            resolver,
            compiler,
            assembler: BulkRequestAssembler::new(),
            reconciler: ResultReconciler::new(),
            client,
        }
    }

    /// Process raw queue records.
    ///
    /// Records that fail to decode or validate are reported first, in arrival
    /// order, followed by messages with failed bulk operations.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn process_records(
        &self,
        records: &[QueueRecord],
    ) -> Result<BatchResponse, PipelineError> {
        let decoded = decode_records(records);
        let outcome = self.validator.validate(decoded.envelopes);

        let rejected: HashSet<&str> = decoded
            .failures
            .iter()
            .chain(outcome.failures.iter())
            .map(String::as_str)
            .collect();
        let rejected_in_order: Vec<String> = records
            .iter()
            .map(|record| record.message_id.as_str())
            .filter(|message_id| rejected.contains(message_id))
            .map(str::to_string)
            .collect();

        let stats = BatchStats {
            received: records.len(),
            dropped: decoded.dropped,
            invalid: rejected.len(),
            ..Default::default()
        };

        self.write(outcome.valid, rejected_in_order, stats).await
    }

    /// Process already decoded envelopes.
    #[instrument(skip(self, envelopes), fields(envelope_count = envelopes.len()))]
    pub async fn process(
        &self,
        envelopes: Vec<IncomingEnvelope>,
    ) -> Result<BatchResponse, PipelineError> {
        let received = envelopes.len();
        let outcome = self.validator.validate(envelopes);

        let stats = BatchStats {
            received,
            invalid: outcome.failures.len(),
            ..Default::default()
        };

        self.write(outcome.valid, outcome.failures, stats).await
    }

    /// Check that the search backend is reachable.
    pub async fn health_check(&self) -> Result<bool, PipelineError> {
        Ok(self.client.health_check().await?)
    }

    async fn write(
        &self,
        mut envelopes: Vec<ValidatedEnvelope>,
        rejected: Vec<String>,
        mut stats: BatchStats,
    ) -> Result<BatchResponse, PipelineError> {
        self.resolver.resolve(&mut envelopes).await;

        let compiled = self.compiler.compile_batch(&envelopes);
        let batch = self.assembler.assemble(compiled);
        stats.commands = batch.operation_count();

        let response = match self.client.submit(batch.request()).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    error = %e,
                    operations = batch.operation_count(),
                    "Bulk request failed, whole batch will be redelivered"
                );
                return Err(e.into());
            }
        };

        let failed = self.reconciler.reconcile(&batch, &response)?;

        let result = BatchResponse::from_message_ids(rejected.into_iter().chain(failed));
        stats.failed = result.batch_item_failures.len();

        info!(
            received = stats.received,
            dropped = stats.dropped,
            invalid = stats.invalid,
            commands = stats.commands,
            failed = stats.failed,
            "Processed batch"
        );

        Ok(result)
    }
}
