//! Content graph provider trait definition.

use async_trait::async_trait;

use crate::errors::ContentGraphError;

/// Point lookups against the content graph.
///
/// Both lookups answer `Ok(None)` when nothing matches; `Err` is reserved
/// for failures to get an answer at all.
#[async_trait]
pub trait ContentGraphProvider: Send + Sync {
    /// Resolve a collection's stable external id from its slug.
    async fn collection_id_by_slug(&self, slug: &str) -> Result<Option<String>, ContentGraphError>;

    /// Resolve the id of the corpus item registered for a URL.
    async fn corpus_item_id_by_url(&self, url: &str) -> Result<Option<String>, ContentGraphError>;
}
