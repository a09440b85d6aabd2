//! Content graph client over GraphQL.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::ContentGraphConfig;
use crate::content_graph::queries::{
    CollectionBySlugData, CorpusItemByUrlData, GraphQlResponse, COLLECTION_BY_SLUG,
    CORPUS_ITEM_BY_URL,
};
use crate::errors::ContentGraphError;
use crate::interfaces::ContentGraphProvider;

/// GraphQL client for the content graph.
pub struct ContentGraphClient {
    http: Client,
    endpoint: Url,
    client_name: String,
    client_version: String,
}

impl ContentGraphClient {
    /// Create a new client for the configured endpoint.
    pub fn new(config: &ContentGraphConfig) -> Result<Self, ContentGraphError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| ContentGraphError::request(e.to_string()))?;

        let http = Client::builder()
            .user_agent(format!("{}/{}", config.client_name, config.client_version))
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(|e| ContentGraphError::request(e.to_string()))?;

        info!(endpoint = %endpoint, "Created content graph client");

        Ok(Self {
            http,
            endpoint,
            client_name: config.client_name.clone(),
            client_version: config.client_version.clone(),
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ContentGraphError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header("apollographql-client-name", &self.client_name)
            .header("apollographql-client-version", &self.client_version)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| ContentGraphError::request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ContentGraphError::request(e.to_string()))?;

        if !status.is_success() {
            return Err(ContentGraphError::status(status.as_u16(), body));
        }

        decode_response(&body)
    }
}

/// Decode a GraphQL response body, surfacing GraphQL errors.
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, ContentGraphError> {
    let response: GraphQlResponse<T> =
        serde_json::from_str(body).map_err(|e| ContentGraphError::parse(e.to_string()))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(ContentGraphError::graphql(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| ContentGraphError::parse("response has neither data nor errors"))
}

#[async_trait]
impl ContentGraphProvider for ContentGraphClient {
    async fn collection_id_by_slug(&self, slug: &str) -> Result<Option<String>, ContentGraphError> {
        let data: CollectionBySlugData = self
            .execute(COLLECTION_BY_SLUG, json!({ "slug": slug }))
            .await?;

        let id = data.get_collection_by_slug.map(|c| c.external_id);
        debug!(slug = %slug, found = id.is_some(), "Resolved collection by slug");
        Ok(id)
    }

    async fn corpus_item_id_by_url(&self, url: &str) -> Result<Option<String>, ContentGraphError> {
        let data: CorpusItemByUrlData = self
            .execute(CORPUS_ITEM_BY_URL, json!({ "url": url }))
            .await?;

        let id = data
            .item_by_url
            .and_then(|item| item.corpus_item)
            .map(|corpus_item| corpus_item.id);
        debug!(url = %url, found = id.is_some(), "Resolved corpus item by url");
        Ok(id)
    }
}
