//! Search document bodies built from curation payloads.

use curation_indexer_shared::{
    ApprovedItemPayload, CollectionAuthor, CollectionPayload, ItemAuthor, RawTimestamp, StoryRef,
};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::GradeRankTable;

/// Builds a document body, leaving out absent fields.
pub(crate) struct DocumentBuilder<'a> {
    doc_id: &'a str,
    fields: Map<String, Value>,
}

impl<'a> DocumentBuilder<'a> {
    pub(crate) fn new(doc_id: &'a str) -> Self {
        Self {
            doc_id,
            fields: Map::new(),
        }
    }

    pub(crate) fn text(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.fields.insert(name.to_string(), Value::from(value));
        }
        self
    }

    pub(crate) fn flag(mut self, name: &str, value: bool) -> Self {
        self.fields.insert(name.to_string(), Value::Bool(value));
        self
    }

    pub(crate) fn optional_flag(self, name: &str, value: Option<bool>) -> Self {
        match value {
            Some(value) => self.flag(name, value),
            None => self,
        }
    }

    pub(crate) fn number(mut self, name: &str, value: Option<u32>) -> Self {
        if let Some(value) = value {
            self.fields.insert(name.to_string(), Value::from(value));
        }
        self
    }

    /// Empty lists are left out like any other absent field.
    pub(crate) fn list(mut self, name: &str, values: Vec<String>) -> Self {
        if !values.is_empty() {
            self.fields.insert(name.to_string(), Value::from(values));
        }
        self
    }

    /// Normalise to epoch seconds; unparseable values are dropped.
    pub(crate) fn timestamp(mut self, name: &str, value: Option<&RawTimestamp>) -> Self {
        let Some(raw) = value else {
            return self;
        };
        match raw.epoch_seconds() {
            Some(seconds) => {
                self.fields.insert(name.to_string(), Value::from(seconds));
            }
            None => warn!(
                corpus_id = %self.doc_id,
                field = %name,
                value = ?raw,
                "Dropping unparseable timestamp"
            ),
        }
        self
    }

    /// Copy a field from another document if it is set there.
    pub(crate) fn inherit(mut self, name: &str, from: &Map<String, Value>) -> Self {
        if let Some(value) = from.get(name) {
            self.fields.insert(name.to_string(), value.clone());
        }
        self
    }

    pub(crate) fn build(self) -> Map<String, Value> {
        self.fields
    }
}

/// Author names ordered by sort order; unordered authors keep their
/// position after the ordered ones.
fn item_author_names(authors: &[ItemAuthor]) -> Vec<String> {
    let mut sorted: Vec<&ItemAuthor> = authors.iter().collect();
    sorted.sort_by_key(|author| (author.sort_order.is_none(), author.sort_order));
    sorted.into_iter().map(|author| author.name.clone()).collect()
}

fn collection_author_names(authors: &[CollectionAuthor]) -> Vec<String> {
    authors
        .iter()
        .filter(|author| author.active.unwrap_or(true))
        .map(|author| author.name.clone())
        .collect()
}

/// Full document for a standalone corpus item.
pub(crate) fn item_document(item: &ApprovedItemPayload, grades: &GradeRankTable) -> Map<String, Value> {
    let language = item.language.as_deref().map(str::to_lowercase);

    DocumentBuilder::new(&item.external_id)
        .text("corpus_id", Some(item.external_id.as_str()))
        .text("url", Some(item.url.as_str()))
        .text("title", item.title.as_deref())
        .text("excerpt", item.excerpt.as_deref())
        .text("language", language.as_deref())
        .text("publisher", item.publisher.as_deref())
        .text("topic", item.topic.as_deref())
        .list("authors", item_author_names(&item.authors))
        .text("image_url", item.image_url.as_deref())
        .timestamp("created_at", item.created_at.as_ref())
        .timestamp("updated_at", item.updated_at.as_ref())
        .timestamp("published_at", item.date_published.as_ref())
        .flag("is_syndicated", item.is_syndicated)
        .flag("is_collection", false)
        .flag("is_collection_story", false)
        .optional_flag("is_time_sensitive", item.is_time_sensitive)
        .text("curation_source", item.source.as_deref())
        .number("quality_rank", item.grade.as_deref().and_then(|g| grades.rank(g)))
        .text("status", item.status.as_deref())
        .build()
}

/// The fields a corpus copy of a collection contributes to the collection.
pub(crate) fn merge_fields(item: &ApprovedItemPayload, grades: &GradeRankTable) -> Map<String, Value> {
    DocumentBuilder::new(&item.external_id)
        .text("publisher", item.publisher.as_deref())
        .text("topic", item.topic.as_deref())
        .text("curation_source", item.source.as_deref())
        .number("quality_rank", item.grade.as_deref().and_then(|g| grades.rank(g)))
        .optional_flag("is_time_sensitive", item.is_time_sensitive)
        .build()
}

/// Full document for a collection.
pub(crate) fn collection_document(collection: &CollectionPayload) -> Map<String, Value> {
    let language = collection.language.as_deref().map(str::to_lowercase);
    let labels = collection
        .labels
        .iter()
        .map(|label| label.name.clone())
        .collect();

    DocumentBuilder::new(&collection.external_id)
        .text("corpus_id", Some(collection.external_id.as_str()))
        .text("collection_slug", Some(collection.slug.as_str()))
        .text("title", collection.title.as_deref())
        .text("excerpt", collection.excerpt.as_deref())
        .text("language", language.as_deref())
        .text("status", collection.status.as_deref())
        .text("image_url", collection.image_url.as_deref())
        .list("authors", collection_author_names(&collection.authors))
        .list("labels", labels)
        .text(
            "curation_category",
            collection.curation_category.as_ref().map(|c| c.name.as_str()),
        )
        .text(
            "iab_parent_category",
            collection.iab_parent_category.as_ref().map(|c| c.name.as_str()),
        )
        .text(
            "iab_child_category",
            collection.iab_child_category.as_ref().map(|c| c.name.as_str()),
        )
        .timestamp("created_at", collection.created_at.as_ref())
        .timestamp("updated_at", collection.updated_at.as_ref())
        .timestamp("published_at", collection.published_at.as_ref())
        .flag("is_collection", true)
        .flag("is_collection_story", false)
        .build()
}

/// Fields every story copies from its collection.
const INHERITED_FIELDS: [&str; 5] = ["language", "labels", "curation_category", "status", "created_at"];

/// Document for a story nested in a collection.
///
/// `parent` is the already built collection document.
pub(crate) fn story_document(
    story: &StoryRef,
    collection_id: &str,
    parent: &Map<String, Value>,
) -> Map<String, Value> {
    let builder = DocumentBuilder::new(&story.external_id)
        .text("corpus_id", Some(story.external_id.as_str()))
        .text("url", Some(story.url.as_str()))
        .text("title", story.title.as_deref())
        .text("excerpt", story.excerpt.as_deref())
        .text("publisher", story.publisher.as_deref())
        .text("image_url", story.image_url.as_deref())
        .list("authors", item_author_names(&story.authors))
        .flag("is_collection", false)
        .flag("is_collection_story", true)
        .text("parent_collection_id", Some(collection_id));

    INHERITED_FIELDS
        .iter()
        .fold(builder, |builder, name| builder.inherit(name, parent))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> ApprovedItemPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_item_document_fields() {
        let doc = item_document(
            &item(json!({
                "externalId": "aaaaa",
                "url": "http://some-url.com",
                "title": "A title",
                "language": "EN",
                "authors": [
                    { "name": "Second", "sortOrder": 2 },
                    { "name": "Unordered" },
                    { "name": "First", "sortOrder": 1 }
                ],
                "createdAt": 1700000000,
                "updatedAt": "2024-01-02T03:04:05Z",
                "datePublished": "not a date",
                "grade": "A",
                "source": "ML",
                "isTimeSensitive": false
            })),
            &GradeRankTable::default(),
        );

        assert_eq!(doc["corpus_id"], json!("aaaaa"));
        assert_eq!(doc["language"], json!("en"));
        assert_eq!(doc["authors"], json!(["First", "Second", "Unordered"]));
        assert_eq!(doc["created_at"], json!(1700000000));
        assert_eq!(doc["updated_at"], json!(1704164645));
        assert!(!doc.contains_key("published_at"));
        assert_eq!(doc["quality_rank"], json!(3));
        assert_eq!(doc["curation_source"], json!("ML"));
        assert_eq!(doc["is_time_sensitive"], json!(false));
        assert_eq!(doc["is_collection"], json!(false));
        assert_eq!(doc["is_collection_story"], json!(false));
        assert_eq!(doc["is_syndicated"], json!(false));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let doc = item_document(
            &item(json!({ "externalId": "aaaaa", "url": "u", "grade": "Z" })),
            &GradeRankTable::default(),
        );

        for absent in ["title", "excerpt", "authors", "publisher", "quality_rank", "is_time_sensitive"] {
            assert!(!doc.contains_key(absent), "{} should be omitted", absent);
        }
        assert!(doc.values().all(|value| !value.is_null()));
    }

    #[test]
    fn test_merge_fields_only() {
        let fields = merge_fields(
            &item(json!({
                "externalId": "ccccc",
                "url": "u",
                "title": "ignored",
                "publisher": "Pocket",
                "topic": "TECHNOLOGY",
                "grade": "b",
                "isTimeSensitive": true
            })),
            &GradeRankTable::default(),
        );

        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["is_time_sensitive", "publisher", "quality_rank", "topic"]);
        assert_eq!(fields["quality_rank"], json!(2));
    }

    #[test]
    fn test_story_inherits_from_collection() {
        let collection: CollectionPayload = serde_json::from_value(json!({
            "externalId": "999rsk",
            "slug": "best-of",
            "language": "de",
            "status": "PUBLISHED",
            "labels": [{ "name": "region-east" }],
            "curationCategory": { "name": "Food", "slug": "food" },
            "createdAt": 1700000000,
            "authors": [{ "name": "Active" }, { "name": "Gone", "active": false }],
            "stories": [{ "externalId": "888jsn", "url": "http://story.com", "publisher": "Paper" }]
        }))
        .unwrap();

        let parent = collection_document(&collection);
        assert_eq!(parent["authors"], json!(["Active"]));
        assert_eq!(parent["collection_slug"], json!("best-of"));

        let story = story_document(&collection.stories[0], &collection.external_id, &parent);
        assert_eq!(story["corpus_id"], json!("888jsn"));
        assert_eq!(story["parent_collection_id"], json!("999rsk"));
        assert_eq!(story["language"], json!("de"));
        assert_eq!(story["labels"], json!(["region-east"]));
        assert_eq!(story["curation_category"], json!("Food"));
        assert_eq!(story["status"], json!("PUBLISHED"));
        assert_eq!(story["created_at"], json!(1700000000));
        assert_eq!(story["is_collection_story"], json!(true));
        assert!(!story.contains_key("collection_slug"));
    }
}
