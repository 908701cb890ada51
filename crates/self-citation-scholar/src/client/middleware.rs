//! Middleware for the HTTP client.
//!
//! [`RateLimitRetry`] retries throttled (429) requests with exponential backoff.
//! Every other response, success or failure, goes straight back to the caller.

use http::Extensions;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next, Result};

use crate::config::RetryPolicy;

/// Retries 429 responses, doubling the delay each time.
///
/// Once the policy's retries are used up the last 429 response is returned
/// as-is; deciding what a persistent 429 means is left to the caller.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitRetry {
    policy: RetryPolicy,
}

impl RateLimitRetry {
    /// Create the middleware with the given policy.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait::async_trait]
impl Middleware for RateLimitRetry {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let url = req.url().clone();
        let mut retry = 0u32;

        loop {
            // Streaming bodies can't be replayed; send those once.
            let Some(attempt) = req.try_clone() else {
                return next.run(req, extensions).await;
            };

            tracing::debug!(url = %url, attempt = retry + 1, "Sending request");
            let response = next.clone().run(attempt, extensions).await?;
            let status = response.status();
            tracing::debug!(url = %url, status = status.as_u16(), "Received response");

            if status != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            if retry >= self.policy.max_retries {
                tracing::warn!(url = %url, retries = retry, "Rate limit retries exhausted");
                return Ok(response);
            }

            let delay = self.policy.delay_for(retry);
            tracing::warn!(
                url = %url,
                attempt = retry + 1,
                delay_ms = delay.as_millis() as u64,
                "Rate limited, backing off"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}
