//! Interface definitions for the external collaborators.
//!
//! The traits here allow dependency injection of the search backend and the
//! content graph, so the pipeline can be exercised against mocks.

mod bulk_index_provider;
mod content_graph_provider;

pub use bulk_index_provider::BulkIndexProvider;
pub use content_graph_provider::ContentGraphProvider;
