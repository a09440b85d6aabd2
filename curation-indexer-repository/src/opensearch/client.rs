//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `BulkIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::BulkIndexError;
use crate::interfaces::BulkIndexProvider;
use crate::types::{BulkRequest, BulkResponse};

/// OpenSearch bulk provider.
///
/// Every action line carries its own `_index`, so requests are sent to the
/// index-less `_bulk` endpoint and may span several language indices.
///
/// # Example
///
/// ```ignore
/// use curation_indexer_repository::{OpenSearchConfig, OpenSearchProvider};
/// let provider = OpenSearchProvider::new(&OpenSearchConfig::new("http://localhost:9200"))?;
/// let response = provider.bulk(&request).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider for the configured server.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(BulkIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(config: &OpenSearchConfig) -> Result<Self, BulkIndexError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| BulkIndexError::configuration(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(config.timeout);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
        }

        let transport = builder
            .build()
            .map_err(|e| BulkIndexError::configuration(e.to_string()))?;

        info!(
            url = %config.url,
            timeout_ms = config.timeout.as_millis() as u64,
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

#[async_trait]
impl BulkIndexProvider for OpenSearchProvider {
    #[instrument(skip(self, request), fields(operations = request.operation_count()))]
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, BulkIndexError> {
        let body: Vec<JsonBody<Value>> = request
            .lines()
            .iter()
            .cloned()
            .map(JsonBody::new)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| BulkIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(BulkIndexError::status(status.as_u16(), error_body));
        }

        let parsed: BulkResponse = response
            .json()
            .await
            .map_err(|e| BulkIndexError::parse(e.to_string()))?;

        debug!(
            took = parsed.took,
            errors = parsed.errors,
            items = parsed.items.len(),
            "Bulk request completed"
        );
        Ok(parsed)
    }

    async fn health_check(&self) -> Result<bool, BulkIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| BulkIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BulkIndexError::parse(e.to_string()))?;

        Ok(matches!(
            body.get("status").and_then(Value::as_str),
            Some("green") | Some("yellow")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchProvider::new(&OpenSearchConfig::new("not a url"));
        assert!(matches!(
            result,
            Err(BulkIndexError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_new_with_credentials() {
        let config = OpenSearchConfig::new("http://localhost:9200")
            .with_credentials("admin", "admin")
            .with_timeout(Duration::from_secs(2));

        assert!(OpenSearchProvider::new(&config).is_ok());
    }
}
