//! Result reconciler.
//!
//! Maps per-operation bulk errors back to the messages that produced them.

use curation_indexer_repository::BulkResponse;
use tracing::{error, instrument};

use crate::assembler::AssembledBatch;
use crate::errors::PipelineError;

/// Reconciler for bulk responses.
#[derive(Debug, Default)]
pub struct ResultReconciler;

impl ResultReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Return the ids of messages with at least one failed operation, in
    /// order of their first failing operation.
    ///
    /// A response that does not have one item per operation cannot be
    /// attributed and fails the whole batch.
    #[instrument(skip(self, batch, response), fields(operation_count = batch.operation_count()))]
    pub fn reconcile(
        &self,
        batch: &AssembledBatch,
        response: &BulkResponse,
    ) -> Result<Vec<String>, PipelineError> {
        if response.items.len() != batch.operation_count() {
            return Err(PipelineError::ResponseMismatch {
                expected: batch.operation_count(),
                actual: response.items.len(),
            });
        }

        let mut failed: Vec<String> = Vec::new();
        for position in response.failed_positions() {
            let Some(message_id) = batch.owner(position) else {
                continue;
            };

            let result = response.items[position].outcome().map(|(_, result)| result);
            let command = batch.command(position);
            error!(
                message_id = %message_id,
                op = command.map(|c| c.op.action()).unwrap_or("unknown"),
                doc_id = command.map(|c| c.doc_id.as_str()).unwrap_or(""),
                index = command.map(|c| c.index.as_str()).unwrap_or(""),
                status = result.map(|r| r.status).unwrap_or_default(),
                error_type = result.and_then(|r| r.error_type()).unwrap_or("unknown"),
                reason = result.and_then(|r| r.error_reason()).unwrap_or(""),
                "Bulk operation failed"
            );

            if !failed.iter().any(|id| id == message_id) {
                failed.push(message_id.to_string());
            }
        }

        Ok(failed)
    }
}
