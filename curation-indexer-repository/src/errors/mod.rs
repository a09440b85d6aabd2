//! Error types for the curation indexer repository.

mod bulk_index_error;
mod content_graph_error;

pub use bulk_index_error::BulkIndexError;
pub use content_graph_error::ContentGraphError;
