//! Inbound envelope types.
//!
//! The queue transport delivers [`QueueRecord`]s whose body is an event-bus
//! document. Decoding happens in two steps: the body is parsed into a
//! [`RawEnvelope`] (message id, detail type, untyped detail) and the detail
//! is then shaped into an [`EventPayload`] according to its [`DetailType`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DecodeError;
use crate::payloads::{ApprovedItemPayload, CollectionPayload, RemovalPayload};

/// A batch of records as delivered by the queue transport.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueRecord>,
}

/// One queue message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    pub message_id: String,
    pub body: String,
}

/// Event-bus document found in a queue record body.
#[derive(Debug, Deserialize)]
struct EventBusBody {
    #[serde(rename = "detail-type")]
    detail_type: String,
    #[serde(default)]
    detail: Value,
}

/// Detail types this indexer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailType {
    AddApprovedItem,
    UpdateApprovedItem,
    RemoveApprovedItem,
    CollectionCreated,
    CollectionUpdated,
}

impl DetailType {
    /// Parse a detail type string, returning `None` for events that are not
    /// meant for this indexer.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add-approved-item" => Some(Self::AddApprovedItem),
            "update-approved-item" => Some(Self::UpdateApprovedItem),
            "remove-approved-item" => Some(Self::RemoveApprovedItem),
            "collection-created" => Some(Self::CollectionCreated),
            "collection-updated" => Some(Self::CollectionUpdated),
            _ => None,
        }
    }

    /// The wire name of this detail type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddApprovedItem => "add-approved-item",
            Self::UpdateApprovedItem => "update-approved-item",
            Self::RemoveApprovedItem => "remove-approved-item",
            Self::CollectionCreated => "collection-created",
            Self::CollectionUpdated => "collection-updated",
        }
    }
}

impl std::fmt::Display for DetailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An envelope before its detail has been shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvelope {
    pub message_id: String,
    pub detail_type: String,
    #[serde(default)]
    pub detail: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDetail {
    approved_item: ApprovedItemPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemovalDetail {
    approved_item: RemovalPayload,
}

#[derive(Deserialize)]
struct CollectionDetail {
    collection: CollectionPayload,
}

impl RawEnvelope {
    /// Parse a queue record body into a raw envelope.
    pub fn from_record(record: &QueueRecord) -> Result<Self, DecodeError> {
        let body: EventBusBody = serde_json::from_str(&record.body)
            .map_err(|e| DecodeError::invalid_body(e.to_string()))?;

        Ok(Self {
            message_id: record.message_id.clone(),
            detail_type: body.detail_type,
            detail: body.detail,
        })
    }

    /// Shape the detail according to the detail type.
    ///
    /// Returns `Ok(None)` when the detail type is not one this indexer
    /// handles; such envelopes are dropped without being reported as failed.
    pub fn decode(self) -> Result<Option<IncomingEnvelope>, DecodeError> {
        let Some(detail_type) = DetailType::parse(&self.detail_type) else {
            return Ok(None);
        };

        let invalid = |e: serde_json::Error| DecodeError::invalid_payload(detail_type.as_str(), e.to_string());

        let payload = match detail_type {
            DetailType::AddApprovedItem | DetailType::UpdateApprovedItem => {
                let detail: ItemDetail = serde_json::from_value(self.detail).map_err(invalid)?;
                EventPayload::ApprovedItem(detail.approved_item)
            }
            DetailType::RemoveApprovedItem => {
                let detail: RemovalDetail = serde_json::from_value(self.detail).map_err(invalid)?;
                EventPayload::Removal(detail.approved_item)
            }
            DetailType::CollectionCreated | DetailType::CollectionUpdated => {
                let detail: CollectionDetail =
                    serde_json::from_value(self.detail).map_err(invalid)?;
                EventPayload::Collection(detail.collection)
            }
        };

        Ok(Some(IncomingEnvelope {
            message_id: self.message_id,
            detail_type,
            payload,
        }))
    }
}

/// The shaped payload of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    ApprovedItem(ApprovedItemPayload),
    Collection(CollectionPayload),
    Removal(RemovalPayload),
}

impl EventPayload {
    /// The content language declared by the payload, if any.
    pub fn language(&self) -> Option<&str> {
        match self {
            EventPayload::ApprovedItem(item) => item.language.as_deref(),
            EventPayload::Collection(collection) => collection.language.as_deref(),
            EventPayload::Removal(removal) => removal.language.as_deref(),
        }
    }

    /// The stable external id of the payload's primary document.
    pub fn external_id(&self) -> &str {
        match self {
            EventPayload::ApprovedItem(item) => &item.external_id,
            EventPayload::Collection(collection) => &collection.external_id,
            EventPayload::Removal(removal) => &removal.external_id,
        }
    }
}

/// A decoded queue message. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingEnvelope {
    pub message_id: String,
    pub detail_type: DetailType,
    pub payload: EventPayload,
}
