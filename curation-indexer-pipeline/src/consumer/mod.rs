//! Consumer module for the curation indexer pipeline.
//!
//! Decodes queue records into typed envelopes and defines the event sum
//! type the rest of the pipeline works on.

mod decoder;
mod messages;

pub use decoder::{decode_records, DecodedBatch};
pub use messages::{CorpusEvent, ValidatedEnvelope};
