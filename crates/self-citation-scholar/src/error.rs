//! Error types for the self-citation pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Malformed citing-work records are not errors: they are filtered and counted by
//! [`crate::retrieval::CitationRetriever`].

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by Semantic Scholar API (429 response after retries ran out)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry, if the API sent one
        retry_after: Option<Duration>,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with an optional retry-after hint in seconds.
    #[must_use]
    pub fn rate_limited(seconds: Option<u64>) -> Self {
        Self::RateLimited { retry_after: seconds.map(Duration::from_secs) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status behind this error, when there was a response at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Middleware(_) | Self::Parse(_) => None,
        }
    }

    /// Returns true if this error is transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Returns true for a 404 from the API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that abort an analysis run.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// Rejected before any network activity.
    #[error("Invalid input: {message}")]
    Input {
        /// What was wrong with the input
        message: String,
    },

    /// Author (or their publication list) is absent from the source.
    #[error("Author not found: {author_id}")]
    NotFound {
        /// Identifier that could not be resolved
        author_id: String,
    },

    /// Author or publication-list retrieval failed.
    #[error("Failed to retrieve {what} for author {author_id}: {source}")]
    Retrieval {
        /// Which resource was being fetched
        what: &'static str,
        /// Identifier the failed request was made for
        author_id: String,
        /// Underlying client failure
        #[source]
        source: ClientError,
    },

    /// Run was abandoned through its cancellation token.
    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Create an input error.
    #[must_use]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input { message: message.into() }
    }

    /// Classify a client failure for an author-scoped request.
    ///
    /// 404s become [`AnalysisError::NotFound`], everything else is a retrieval failure.
    #[must_use]
    pub fn from_client(what: &'static str, author_id: impl Into<String>, err: ClientError) -> Self {
        let author_id = author_id.into();
        if err.is_not_found() {
            Self::NotFound { author_id }
        } else {
            Self::Retrieval { what, author_id, source: err }
        }
    }

    /// Identifier attached to this failure, if any.
    #[must_use]
    pub fn author_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { author_id } | Self::Retrieval { author_id, .. } => Some(author_id),
            Self::Input { .. } | Self::Cancelled => None,
        }
    }

    /// Convert to the single terminal message shown for an aborted run.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::NotFound { author_id } => {
                format!("Author not found: {author_id}. Please check the ID is correct.")
            }
            Self::Retrieval { source: ClientError::RateLimited { .. }, author_id, .. } => {
                format!(
                    "Rate limited by Semantic Scholar API while fetching author {author_id}. \
                     Please try again later."
                )
            }
            Self::Input { message } => format!("Invalid input: {message}"),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for analysis runs.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
