//! # Curation Indexer Repository
//!
//! This crate provides traits and implementations for the two external
//! collaborators of the curation indexer: the search backend's bulk endpoint
//! and the content graph used for cross-reference lookups. It includes
//! definitions for errors, interfaces, the bulk wire types, a retrying bulk
//! client, and concrete implementations for OpenSearch and GraphQL.

pub mod client;
pub mod config;
pub mod content_graph;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use client::BulkIndexClient;
pub use config::{BulkIndexConfig, ContentGraphConfig, OpenSearchConfig};
pub use content_graph::ContentGraphClient;
pub use errors::{BulkIndexError, ContentGraphError};
pub use interfaces::{BulkIndexProvider, ContentGraphProvider};
pub use opensearch::OpenSearchProvider;
pub use types::{BulkItemResult, BulkRequest, BulkResponse, BulkResponseItem};
