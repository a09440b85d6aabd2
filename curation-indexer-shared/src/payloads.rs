//! Curation payloads carried by inbound events.
//!
//! Field names follow the camelCase JSON emitted by the curation services.
//! Everything except the stable external id is optional: producers omit
//! fields freely and the compiler only writes what is present.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A timestamp as producers send it: epoch seconds, or an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Integer epoch seconds.
    Seconds(i64),
    /// Epoch seconds with a fractional part.
    Fractional(f64),
    /// RFC-3339 / ISO-8601 text, or epoch seconds as a string.
    Text(String),
}

impl RawTimestamp {
    /// Normalise to integer epoch seconds.
    ///
    /// Returns `None` when the value cannot be interpreted as a point in time.
    pub fn epoch_seconds(&self) -> Option<i64> {
        match self {
            RawTimestamp::Seconds(secs) => Some(*secs),
            RawTimestamp::Fractional(secs) if secs.is_finite() => Some(secs.trunc() as i64),
            RawTimestamp::Fractional(_) => None,
            RawTimestamp::Text(text) => parse_text_timestamp(text.trim()),
        }
    }
}

fn parse_text_timestamp(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    if let Ok(secs) = text.parse::<i64>() {
        return Some(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
}

/// Treat an explicit `null` the same as a missing key.
fn null_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An author credited on a corpus item or story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAuthor {
    pub name: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// An author credited on a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAuthor {
    pub name: String,
    #[serde(default)]
    pub active: Option<bool>,
}

/// A free-form label attached to a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Editorial category of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationCategory {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// IAB taxonomy category of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IabCategory {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// An approved corpus item, as carried by item added/updated events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedItemPayload {
    pub external_id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub authors: Vec<ItemAuthor>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub updated_at: Option<RawTimestamp>,
    #[serde(default)]
    pub date_published: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub is_syndicated: bool,
    #[serde(default, deserialize_with = "null_or_default")]
    pub is_collection: bool,
    #[serde(default)]
    pub is_time_sensitive: Option<bool>,
    /// Curation source (e.g. the tool or team that approved the item).
    #[serde(default)]
    pub source: Option<String>,
    /// Editorial quality grade ("A", "B", "C").
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A story nested in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRef {
    pub external_id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub authors: Vec<ItemAuthor>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// A collection, as carried by collection created/updated events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    pub external_id: String,
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub authors: Vec<CollectionAuthor>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub curation_category: Option<CurationCategory>,
    #[serde(default, rename = "IABParentCategory", alias = "iabParentCategory")]
    pub iab_parent_category: Option<IabCategory>,
    #[serde(default, rename = "IABChildCategory", alias = "iabChildCategory")]
    pub iab_child_category: Option<IabCategory>,
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub updated_at: Option<RawTimestamp>,
    #[serde(default)]
    pub published_at: Option<RawTimestamp>,
    /// Stories in editorial order.
    #[serde(default, deserialize_with = "null_or_default")]
    pub stories: Vec<StoryRef>,
}

/// The minimal item shape needed to remove a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalPayload {
    pub external_id: String,
    #[serde(default)]
    pub language: Option<String>,
}
