//! Configuration types for the repository clients.

use std::time::Duration;

/// Retry policy for the [`BulkIndexClient`](crate::client::BulkIndexClient).
#[derive(Debug, Clone)]
pub struct BulkIndexConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Upper bound for the backoff delay, in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for BulkIndexConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 5000,
        }
    }
}

impl BulkIndexConfig {
    /// Create a config that never retries.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Create a config with a custom retry count.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }
}

/// Connection settings for the OpenSearch bulk provider.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// The OpenSearch server URL (e.g. "http://localhost:9200").
    pub url: String,
    /// Optional basic-auth credentials.
    pub username: Option<String>,
    pub password: Option<String>,
    /// Hard timeout on every outbound request.
    pub timeout: Duration,
}

impl OpenSearchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Connection settings for the content graph client.
#[derive(Debug, Clone)]
pub struct ContentGraphConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Client name reported to the gateway.
    pub client_name: String,
    /// Client version reported to the gateway.
    pub client_version: String,
    /// Hard timeout on every lookup.
    pub timeout: Duration,
}

impl ContentGraphConfig {
    pub fn new(endpoint: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_name: client_name.into(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
