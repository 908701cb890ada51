//! Configuration for the Semantic Scholar client and the analysis pipeline.

use std::time::Duration;

use anyhow::Context;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Retries after the first 429 before giving up.
    pub const MAX_RETRIES: u32 = 5;

    /// First backoff delay after a 429; doubles on every retry.
    pub const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

    /// Publications requested per page of `/author/{id}/papers`.
    pub const PAPERS_PAGE_SIZE: u32 = 100;

    /// Upper bound for the single `/paper/{id}/citations` request.
    pub const CITATIONS_LIMIT: u32 = 1000;

    /// Publications analyzed per batch.
    pub const BATCH_SIZE: usize = 1;

    /// Pause between citation batches.
    pub const BATCH_PAUSE: Duration = Duration::from_secs(1);

    /// Pause between consecutive author lookups.
    pub const AUTHOR_FETCH_PAUSE: Duration = Duration::from_secs(1);
}

/// Field sets for API requests.
pub mod fields {
    /// Author profile fields.
    pub const AUTHOR: &[&str] = &[
        "authorId",
        "name",
        "url",
        "affiliations",
        "homepage",
        "paperCount",
        "citationCount",
        "hIndex",
    ];

    /// Publication fields for author paper listings.
    pub const PAPER: &[&str] = &[
        "paperId",
        "title",
        "year",
        "authors",
        "venue",
        "citationCount",
        "referenceCount",
        "fieldsOfStudy",
        "url",
        "abstract",
    ];

    /// Fields requested for each citing paper.
    pub const CITING_PAPER: &[&str] = &["paperId", "title", "year", "authors", "venue", "url"];
}

/// Backoff policy for throttled (429) responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Delay to wait before retry number `retry` (0-based): `initial * 2^retry`.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.initial_delay.saturating_mul(2u32.saturating_pow(retry))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: api::MAX_RETRIES, initial_delay: api::INITIAL_RETRY_DELAY }
    }
}

/// Client configuration.
#[derive(Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional, forwarded as `x-api-key`).
    pub api_key: Option<String>,

    /// Base URL for Graph API (for testing with mock servers).
    pub graph_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Backoff on 429 responses.
    pub retry: RetryPolicy,
}

impl Config {
    /// Create a new configuration with optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            retry: RetryPolicy { max_retries: 2, initial_delay: Duration::from_millis(0) },
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SEMANTIC_SCHOLAR_API_KEY` and, optionally, `SEMANTIC_SCHOLAR_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns error if the API URL override is not a valid http(s) URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok().filter(|k| !k.is_empty());
        let mut config = Self::new(api_key);
        if let Ok(raw) = std::env::var("SEMANTIC_SCHOLAR_API_URL") {
            config.graph_api_url = validate_base_url(&raw)?;
        }
        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_api_key", &self.has_api_key())
            .field("graph_api_url", &self.graph_api_url)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Check that a base URL parses and uses http(s); trailing slashes are dropped.
fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw).with_context(|| format!("invalid API URL: {raw}"))?;
    anyhow::ensure!(
        matches!(parsed.scheme(), "http" | "https"),
        "API URL must use http or https: {raw}"
    );
    Ok(raw.trim_end_matches('/').to_string())
}

/// Per-run pacing for the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Publications whose citations are fetched concurrently within one batch.
    pub batch_size: usize,

    /// Pause between batches.
    pub batch_pause: Duration,

    /// Pause between author lookups.
    pub author_pause: Duration,

    /// Publications per page.
    pub page_size: u32,

    /// Maximum citing works requested per publication.
    pub citation_limit: u32,
}

impl PipelineConfig {
    /// Pipeline settings without any pauses, for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            batch_size: 1,
            batch_pause: Duration::ZERO,
            author_pause: Duration::ZERO,
            page_size: api::PAPERS_PAGE_SIZE,
            citation_limit: api::CITATIONS_LIMIT,
        }
    }

    /// Set the batch size; zero is treated as one.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: api::BATCH_SIZE,
            batch_pause: api::BATCH_PAUSE,
            author_pause: api::AUTHOR_FETCH_PAUSE,
            page_size: api::PAPERS_PAGE_SIZE,
            citation_limit: api::CITATIONS_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.retry.max_retries, 5);
    }

    #[test]
    fn test_config_with_api_key() {
        let config = Config::new(Some("test-key".to_string()));
        assert!(config.has_api_key());
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }

    #[test]
    fn test_config_debug_hides_api_key() {
        let config = Config::new(Some("very-secret".to_string()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("has_api_key: true"));
    }

    #[test]
    fn test_retry_policy_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("http://localhost:8080/graph/v1/").unwrap(),
            "http://localhost:8080/graph/v1"
        );
        assert!(validate_base_url("ftp://example.org").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_pipeline_batch_size_floor() {
        let config = PipelineConfig::for_testing().with_batch_size(0);
        assert_eq!(config.batch_size, 1);
        let defaults = PipelineConfig::default();
        assert_eq!(defaults.batch_pause, Duration::from_secs(1));
        assert_eq!(defaults.page_size, 100);
        assert_eq!(defaults.citation_limit, 1000);
    }

    #[test]
    fn test_fields() {
        assert!(fields::PAPER.contains(&"citationCount"));
        assert!(fields::CITING_PAPER.contains(&"authors"));
        assert!(fields::AUTHOR.contains(&"hIndex"));
    }
}
