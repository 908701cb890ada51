//! Semantic Scholar API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Backoff on 429 responses ([`RateLimitRetry`])
//! - Status mapping into [`ClientError`]
//!
//! The pipeline talks to the API through the [`ScholarSource`] trait so it can
//! run against in-memory sources in tests.

#[cfg(test)]
pub(crate) mod fake;
mod middleware;

pub use middleware::RateLimitRetry;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::config::{Config, api, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthorPapersPage, AuthorRecord, CitationPage};

/// The three bibliographic lookups the analysis needs.
#[async_trait::async_trait]
pub trait ScholarSource: Send + Sync {
    /// Fetch one author profile.
    async fn author(&self, author_id: &str) -> ClientResult<AuthorRecord>;

    /// Fetch one page of an author's publications.
    async fn author_papers(
        &self,
        author_id: &str,
        offset: u32,
        limit: u32,
    ) -> ClientResult<AuthorPapersPage>;

    /// Fetch the works citing a paper in a single request.
    async fn citations(&self, paper_id: &str, limit: u32) -> ClientResult<CitationPage>;
}

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,
}

impl SemanticScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        if let Some(ref key) = config.api_key {
            let mut value: reqwest::header::HeaderValue = key.parse()?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client =
            ClientBuilder::new(client).with(RateLimitRetry::new(config.retry)).build();

        Ok(Self { client, api_key: config.api_key, graph_api_url: config.graph_api_url })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get an author by ID.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author(&self, author_id: &str) -> ClientResult<AuthorRecord> {
        let url = format!("{}/author/{}", self.graph_api_url, author_id);
        let params = vec![("fields".to_string(), fields::AUTHOR.join(","))];

        self.get(&url, &params).await
    }

    /// Get one page of an author's papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        offset: u32,
        limit: u32,
    ) -> ClientResult<AuthorPapersPage> {
        let url = format!("{}/author/{}/papers", self.graph_api_url, author_id);

        let params = vec![
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields::PAPER.join(",")),
        ];

        self.get(&url, &params).await
    }

    /// Get paper citations.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_citations(&self, paper_id: &str, limit: u32) -> ClientResult<CitationPage> {
        let url = format!("{}/paper/{}/citations", self.graph_api_url, paper_id);

        let params = vec![
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields::CITING_PAPER.join(",")),
        ];

        self.get(&url, &params).await
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl ScholarSource for SemanticScholarClient {
    async fn author(&self, author_id: &str) -> ClientResult<AuthorRecord> {
        self.get_author(author_id).await
    }

    async fn author_papers(
        &self,
        author_id: &str,
        offset: u32,
        limit: u32,
    ) -> ClientResult<AuthorPapersPage> {
        self.get_author_papers(author_id, offset, limit).await
    }

    async fn citations(&self, paper_id: &str, limit: u32) -> ClientResult<CitationPage> {
        self.get_citations(paper_id, limit).await
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient")
            .field("has_api_key", &self.has_api_key())
            .field("graph_api_url", &self.graph_api_url)
            .finish()
    }
}
