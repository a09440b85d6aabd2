//! GraphQL documents and response shapes for the content graph lookups.

use serde::Deserialize;

/// Resolve a collection by its slug.
pub const COLLECTION_BY_SLUG: &str = r#"
query CollectionBySlug($slug: String!) {
  getCollectionBySlug(slug: $slug) {
    externalId
  }
}
"#;

/// Resolve the corpus item registered for a URL.
pub const CORPUS_ITEM_BY_URL: &str = r#"
query CorpusItemByUrl($url: String!) {
  itemByUrl(url: $url) {
    corpusItem {
      id
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionBySlugData {
    pub get_collection_by_slug: Option<CollectionRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRef {
    pub external_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusItemByUrlData {
    pub item_by_url: Option<ItemRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub corpus_item: Option<CorpusItemRef>,
}

#[derive(Debug, Deserialize)]
pub struct CorpusItemRef {
    pub id: String,
}
