//! # Curation Indexer Shared
//!
//! Types shared by every crate of the curation indexer: the envelopes
//! delivered by the queue transport, the curation payloads they carry, the
//! index commands compiled from them and the per-message failure report
//! handed back to the transport.

pub mod command;
pub mod envelope;
pub mod errors;
pub mod failure;
pub mod payloads;

pub use command::{BulkOp, IndexCommand};
pub use envelope::{DetailType, EventPayload, IncomingEnvelope, QueueBatch, QueueRecord, RawEnvelope};
pub use errors::DecodeError;
pub use failure::{BatchItemFailure, BatchResponse};
pub use payloads::{
    ApprovedItemPayload, CollectionAuthor, CollectionPayload, CurationCategory, IabCategory,
    ItemAuthor, Label, RawTimestamp, RemovalPayload, StoryRef,
};
