//! Queue record decoding.

use curation_indexer_shared::{IncomingEnvelope, QueueRecord, RawEnvelope};
use tracing::{debug, warn};

/// Result of decoding one batch of queue records.
#[derive(Debug, Default)]
pub struct DecodedBatch {
    /// Envelopes with a known detail type and a well-formed payload.
    pub envelopes: Vec<IncomingEnvelope>,
    /// Message ids whose body or payload could not be decoded.
    pub failures: Vec<String>,
    /// Number of records skipped because their detail type is not handled.
    pub dropped: usize,
}

/// Decode queue records in arrival order.
///
/// Undecodable records are reported as failures so the transport redelivers
/// them. Records with an unknown detail type are dropped without a failure.
pub fn decode_records(records: &[QueueRecord]) -> DecodedBatch {
    let mut batch = DecodedBatch::default();

    for record in records {
        let decoded = RawEnvelope::from_record(record).and_then(RawEnvelope::decode);
        match decoded {
            Ok(Some(envelope)) => batch.envelopes.push(envelope),
            Ok(None) => {
                debug!(message_id = %record.message_id, "Dropping unhandled detail type");
                batch.dropped += 1;
            }
            Err(e) => {
                warn!(
                    message_id = %record.message_id,
                    error = %e,
                    "Failed to decode queue record"
                );
                batch.failures.push(record.message_id.clone());
            }
        }
    }

    batch
}
