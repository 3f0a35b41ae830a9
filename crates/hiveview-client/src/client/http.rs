//! HTTP layer: status mapping and retry.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes beyond 206 vs 200 for range replies.

use std::time::Duration;

use reqwest::header::RANGE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use hiveview_core::LogRange;

use crate::config::ViewerConfig;
use crate::error::{ViewerError, ViewerResult};

use super::helpers::error_excerpt;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Delay before retry number `retries` (1-based): the server's `Retry-After`
/// when given, otherwise jittered exponential backoff. Both capped at 30s.
fn retry_backoff(err: &ViewerError, retries: u32) -> Duration {
    use rand::Rng;

    match err {
        ViewerError::RateLimited {
            retry_after: Some(retry_after),
        } => (*retry_after).min(MAX_BACKOFF),
        _ => {
            // 2^5 already exceeds the cap
            let base_backoff = Duration::from_secs(1u64 << retries.min(5)).min(MAX_BACKOFF);
            let jittered_ms = rand::thread_rng().gen_range(0..=base_backoff.as_millis() as u64);
            Duration::from_millis(jittered_ms.max(10))
        }
    }
}

/// HTTP backend for making requests (holds reqwest client and config).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) config: ViewerConfig,
}

impl HttpBackend {
    /// GET a document body as text.
    pub(crate) async fn get_text(&self, url: &str) -> ViewerResult<String> {
        let response = self.request(url, None).await?;
        response.text().await.map_err(|e| ViewerError::Network {
            message: format!("failed to read response body from {}: {}", url, e),
        })
    }

    /// GET with a `Range` header. Returns the response so the caller can
    /// distinguish 206 from a server that ignored the range.
    pub(crate) async fn get_range(
        &self,
        url: &str,
        range: LogRange,
    ) -> ViewerResult<reqwest::Response> {
        self.request(url, Some(range)).await
    }

    async fn request(&self, url: &str, range: Option<LogRange>) -> ViewerResult<reqwest::Response> {
        let mut retries: u32 = 0;
        let max_retries = self.config.max_retries;

        loop {
            let result = self.request_once(url, range).await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retries < max_retries => {
                    retries += 1;

                    let backoff = retry_backoff(&e, retries);

                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = max_retries,
                        backoff_ms = backoff.as_millis(),
                        "retrying request"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request_once(
        &self,
        url: &str,
        range: Option<LogRange>,
    ) -> ViewerResult<reqwest::Response> {
        let mut request = self.client.get(url);

        if let Some(range) = range {
            request = request.header(RANGE, range.header_value());
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "response");

        match status {
            s if s.is_success() => Ok(response),

            StatusCode::NOT_FOUND => Err(ViewerError::NotFound {
                url: url.to_string(),
            }),

            StatusCode::RANGE_NOT_SATISFIABLE => Err(ViewerError::InvalidRange {
                message: format!(
                    "{} not satisfiable for {}",
                    range.map(|r| r.header_value()).unwrap_or_default(),
                    url
                ),
            }),

            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Err(ViewerError::RateLimited { retry_after })
            }

            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ViewerError::Http {
                    status: status.as_u16(),
                    url: url.to_string(),
                    message: error_excerpt(&body, status),
                })
            }
        }
    }
}
