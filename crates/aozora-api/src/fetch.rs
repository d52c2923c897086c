//! Retry/timeout wrapper around outbound HTTP calls.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use thiserror::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("request body cannot be replayed for retry")]
    NotRetryable,
}

/// HTTP client with a bounded-retry, single-deadline fetch policy.
///
/// One deadline spans the whole attempt sequence; when it fires the
/// in-flight attempt is aborted. HTTP 429 and transport errors retry
/// without delay up to the attempt limit; every other status is returned
/// unmodified for the caller to interpret.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    timeout: Duration,
    max_attempts: u32,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TIMEOUT, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_limits(timeout: Duration, max_attempts: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
            max_attempts,
        }
    }

    /// The underlying client, for building requests to pass to [`execute`].
    ///
    /// [`execute`]: FetchClient::execute
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send a request, retrying on 429 and transport errors.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        match tokio::time::timeout(self.timeout, self.attempt_loop(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }

    async fn attempt_loop(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut last_transport = None;

        for attempt in 1..=self.max_attempts {
            let req = request.try_clone().ok_or(FetchError::NotRetryable)?;
            match req.send().await {
                Ok(resp) if resp.status() == StatusCode::TOO_MANY_REQUESTS => {
                    tracing::warn!(attempt, max = self.max_attempts, "rate limited, retrying");
                }
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max = self.max_attempts,
                        error = %e,
                        "fetch attempt failed"
                    );
                    last_transport = Some(e);
                }
            }
        }

        Err(match last_transport {
            Some(e) => FetchError::Transport(e),
            None => FetchError::RateLimited {
                attempts: self.max_attempts,
            },
        })
    }
}
