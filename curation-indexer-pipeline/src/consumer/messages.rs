//! Message types flowing through the pipeline.

use curation_indexer_shared::{
    ApprovedItemPayload, CollectionPayload, EventPayload, RemovalPayload,
};

/// A curation event after classification.
///
/// Cross-reference variants carry an optional resolved id which starts out
/// as `None` and is filled in by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum CorpusEvent {
    /// A plain approved item.
    AddItem(ApprovedItemPayload),
    /// An approved item leaving the corpus.
    RemoveItem(RemovalPayload),
    /// A collection together with its stories.
    AddCollection(CollectionPayload),
    /// A corpus copy of a collection, merged into the collection document.
    MergeCollectionCopy {
        item: ApprovedItemPayload,
        collection_id: Option<String>,
    },
    /// A syndicated item that supersedes the original article.
    AddSyndicatedItem {
        item: ApprovedItemPayload,
        duplicate_id: Option<String>,
    },
}

impl CorpusEvent {
    /// Classify a decoded payload.
    ///
    /// An approved item flagged as a collection copy is a merge even when it
    /// is also flagged as syndicated.
    pub fn classify(payload: EventPayload) -> Self {
        match payload {
            EventPayload::ApprovedItem(item) if item.is_collection => {
                CorpusEvent::MergeCollectionCopy {
                    item,
                    collection_id: None,
                }
            }
            EventPayload::ApprovedItem(item) if item.is_syndicated => {
                CorpusEvent::AddSyndicatedItem {
                    item,
                    duplicate_id: None,
                }
            }
            EventPayload::ApprovedItem(item) => CorpusEvent::AddItem(item),
            EventPayload::Removal(removal) => CorpusEvent::RemoveItem(removal),
            EventPayload::Collection(collection) => CorpusEvent::AddCollection(collection),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CorpusEvent::AddItem(_) => "add_item",
            CorpusEvent::RemoveItem(_) => "remove_item",
            CorpusEvent::AddCollection(_) => "add_collection",
            CorpusEvent::MergeCollectionCopy { .. } => "merge_collection_copy",
            CorpusEvent::AddSyndicatedItem { .. } => "add_syndicated_item",
        }
    }

    /// The external id of the event's primary document.
    pub fn external_id(&self) -> &str {
        match self {
            CorpusEvent::AddItem(item)
            | CorpusEvent::MergeCollectionCopy { item, .. }
            | CorpusEvent::AddSyndicatedItem { item, .. } => &item.external_id,
            CorpusEvent::RemoveItem(removal) => &removal.external_id,
            CorpusEvent::AddCollection(collection) => &collection.external_id,
        }
    }
}

/// An envelope that passed validation.
///
/// `index` is derived from the payload language and is the same for every
/// command the envelope compiles to.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEnvelope {
    pub message_id: String,
    pub index: String,
    pub event: CorpusEvent,
}
