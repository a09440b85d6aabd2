//! Cross-reference resolver.
//!
//! Fills in the ids that merge and dedup commands need by asking the content
//! graph. Lookups run one at a time, and consecutive syndication lookups are
//! spaced by a [`DelayStrategy`]. A failed lookup is treated as "not found".

mod scheduler;
mod slug;

pub use scheduler::{DelayStrategy, FixedDelay, NoDelay};
pub use slug::collection_slug;

use std::sync::Arc;

use curation_indexer_repository::ContentGraphProvider;
use tracing::{debug, instrument, warn};

use crate::consumer::{CorpusEvent, ValidatedEnvelope};

/// Resolver for collection-merge and syndication-dedup lookups.
pub struct CrossReferenceResolver {
    graph: Arc<dyn ContentGraphProvider>,
    delay: Arc<dyn DelayStrategy>,
}

impl CrossReferenceResolver {
    /// Create a new resolver.
    pub fn new(graph: Arc<dyn ContentGraphProvider>, delay: Arc<dyn DelayStrategy>) -> Self {
        Self { graph, delay }
    }

    /// Resolve cross-references in place.
    ///
    /// Only `MergeCollectionCopy` and `AddSyndicatedItem` events are touched.
    #[instrument(skip(self, envelopes), fields(envelope_count = envelopes.len()))]
    pub async fn resolve(&self, envelopes: &mut [ValidatedEnvelope]) {
        let mut syndication_lookups = 0usize;

        for envelope in envelopes.iter_mut() {
            match &mut envelope.event {
                CorpusEvent::MergeCollectionCopy {
                    item,
                    collection_id,
                } => {
                    *collection_id = self.lookup_collection(&envelope.message_id, &item.url).await;
                }
                CorpusEvent::AddSyndicatedItem { item, duplicate_id } => {
                    if syndication_lookups > 0 {
                        self.delay.pause().await;
                    }
                    syndication_lookups += 1;

                    *duplicate_id = self
                        .lookup_duplicate(&envelope.message_id, &item.url)
                        .await
                        .filter(|id| {
                            let own = id == &item.external_id;
                            if own {
                                debug!(
                                    message_id = %envelope.message_id,
                                    corpus_id = %item.external_id,
                                    "Dedup lookup returned the item itself"
                                );
                            }
                            !own
                        });
                }
                CorpusEvent::AddItem(_)
                | CorpusEvent::RemoveItem(_)
                | CorpusEvent::AddCollection(_) => {}
            }
        }
    }

    async fn lookup_collection(&self, message_id: &str, url: &str) -> Option<String> {
        let Some(slug) = collection_slug(url) else {
            warn!(
                message_id = %message_id,
                url = %url,
                "Could not extract collection slug, skipping merge"
            );
            return None;
        };

        match self.graph.collection_id_by_slug(slug).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                debug!(message_id = %message_id, slug = %slug, "No collection for slug");
                None
            }
            Err(e) => {
                warn!(
                    message_id = %message_id,
                    slug = %slug,
                    error = %e,
                    "Collection lookup failed, skipping merge"
                );
                None
            }
        }
    }

    async fn lookup_duplicate(&self, message_id: &str, url: &str) -> Option<String> {
        match self.graph.corpus_item_id_by_url(url).await {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    message_id = %message_id,
                    url = %url,
                    error = %e,
                    "Dedup lookup failed, skipping delete"
                );
                None
            }
        }
    }
}
