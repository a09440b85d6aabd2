//! Settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use curation_indexer_pipeline::config::{GradeRankTable, LanguageIndexTable};
use curation_indexer_repository::{BulkIndexConfig, ContentGraphConfig, OpenSearchConfig};

use crate::IndexingError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default OpenSearch request timeout.
const DEFAULT_OPENSEARCH_TIMEOUT_MS: u64 = 10_000;

/// Default content graph endpoint.
const DEFAULT_CONTENT_GRAPH_URL: &str = "http://localhost:4001/graphql";

/// Default client name sent to the content graph.
const DEFAULT_CONTENT_GRAPH_CLIENT_NAME: &str = "curation-indexer";

/// Default pause between syndication lookups.
const DEFAULT_SYNDICATION_LOOKUP_DELAY_MS: u64 = 100;

/// Everything needed to build the indexer's dependencies.
#[derive(Debug, Clone)]
pub struct IndexerSettings {
    pub opensearch: OpenSearchConfig,
    pub content_graph: ContentGraphConfig,
    pub bulk: BulkIndexConfig,
    pub syndication_lookup_delay: Duration,
    pub languages: LanguageIndexTable,
    pub grades: GradeRankTable,
}

impl IndexerSettings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: basic auth, both or neither
    /// - `OPENSEARCH_TIMEOUT_MS`: request timeout (default: 10000)
    /// - `CONTENT_GRAPH_URL`: GraphQL endpoint (default: http://localhost:4001/graphql)
    /// - `CONTENT_GRAPH_CLIENT_NAME`: client name header (default: curation-indexer)
    /// - `BULK_MAX_RETRIES`, `BULK_INITIAL_RETRY_DELAY_MS`, `BULK_MAX_RETRY_DELAY_MS`
    /// - `SYNDICATION_LOOKUP_DELAY_MS`: pause between dedup lookups (default: 100)
    /// - `INDEX_LANGUAGE_MAP`: e.g. `en=corpus_en,de=corpus_de`
    /// - `GRADE_RANK_MAP`: e.g. `A=3,B=2,C=1`
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut opensearch = OpenSearchConfig::new(
            get("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
        )
        .with_timeout(Duration::from_millis(parse_or(
            &get,
            "OPENSEARCH_TIMEOUT_MS",
            DEFAULT_OPENSEARCH_TIMEOUT_MS,
        )?));
        match (get("OPENSEARCH_USERNAME"), get("OPENSEARCH_PASSWORD")) {
            (Some(username), Some(password)) => {
                opensearch = opensearch.with_credentials(username, password);
            }
            (None, None) => {}
            _ => {
                return Err(IndexingError::config(
                    "OPENSEARCH_USERNAME and OPENSEARCH_PASSWORD must be set together",
                ))
            }
        }

        let content_graph = ContentGraphConfig::new(
            get("CONTENT_GRAPH_URL").unwrap_or_else(|| DEFAULT_CONTENT_GRAPH_URL.to_string()),
            get("CONTENT_GRAPH_CLIENT_NAME")
                .unwrap_or_else(|| DEFAULT_CONTENT_GRAPH_CLIENT_NAME.to_string()),
        );

        let defaults = BulkIndexConfig::default();
        let bulk = BulkIndexConfig {
            max_retries: parse_or(&get, "BULK_MAX_RETRIES", defaults.max_retries)?,
            initial_retry_delay_ms: parse_or(
                &get,
                "BULK_INITIAL_RETRY_DELAY_MS",
                defaults.initial_retry_delay_ms,
            )?,
            max_retry_delay_ms: parse_or(&get, "BULK_MAX_RETRY_DELAY_MS", defaults.max_retry_delay_ms)?,
        };

        let syndication_lookup_delay = Duration::from_millis(parse_or(
            &get,
            "SYNDICATION_LOOKUP_DELAY_MS",
            DEFAULT_SYNDICATION_LOOKUP_DELAY_MS,
        )?);

        let languages = match get("INDEX_LANGUAGE_MAP") {
            Some(mapping) => LanguageIndexTable::parse(&mapping)?,
            None => LanguageIndexTable::default(),
        };
        let grades = match get("GRADE_RANK_MAP") {
            Some(mapping) => GradeRankTable::parse(&mapping)?,
            None => GradeRankTable::default(),
        };

        Ok(Self {
            opensearch,
            content_graph,
            bulk,
            syndication_lookup_delay,
            languages,
            grades,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| IndexingError::config(format!("Invalid {} '{}': {}", key, value, e))),
        None => Ok(default),
    }
}
