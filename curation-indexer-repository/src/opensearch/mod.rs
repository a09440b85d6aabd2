//! OpenSearch implementation of the bulk index provider.
//!
//! This module provides a concrete implementation of `BulkIndexProvider`
//! using OpenSearch as the backend.

mod client;

pub use client::OpenSearchProvider;
