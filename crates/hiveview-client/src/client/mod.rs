//! Results client for discovery, listings, suite files and log excerpts.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE, USER_AGENT};
use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use hiveview_core::{parse_discovery, parse_listing, Directory, LogRange, SuiteDetail, TestRun};

use crate::config::ViewerConfig;
use crate::error::{ViewerError, ViewerResult};
use crate::types::{DirectoryRuns, LogExcerpt};

mod helpers;
mod http;

use helpers::{content_range_total, discovery_url};
use http::HttpBackend;

pub const VIEWER_USER_AGENT: &str = concat!("hiveview/", env!("CARGO_PKG_VERSION"));

/// Read-only client for a hive results server.
#[derive(Debug, Clone)]
pub struct ViewerClient {
    http: HttpBackend,
}

impl ViewerClient {
    pub fn new(config: ViewerConfig) -> ViewerResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(VIEWER_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ViewerError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ViewerError::Config {
                message: "results URL is empty".to_string(),
            });
        }

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                config,
            },
        })
    }

    pub fn from_env() -> ViewerResult<Self> {
        Self::new(ViewerConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    /// GET `{base}/discovery.json`.
    pub async fn fetch_directories(&self) -> ViewerResult<Vec<Directory>> {
        let url = discovery_url(&self.http.base_url);
        debug!(url = %url, "fetching discovery");

        let text = self.http.get_text(&url).await?;
        parse_discovery(&text).map_err(|e| ViewerError::from_core(e, url))
    }

    /// GET `{address}/listing.jsonl`, newest run first.
    pub async fn fetch_listing(&self, directory: &Directory) -> ViewerResult<Vec<TestRun>> {
        let url = directory.listing_url();
        debug!(url = %url, directory = %directory.name, "fetching listing");

        let text = self.http.get_text(&url).await?;
        parse_listing(&text).map_err(|e| ViewerError::from_core(e, url))
    }

    /// Fetch listings of all directories concurrently.
    ///
    /// A failing directory is logged and left out; it never affects the
    /// others. Output keeps the input order.
    pub async fn fetch_all_listings(&self, directories: &[Directory]) -> Vec<DirectoryRuns> {
        let sem = Arc::new(Semaphore::new(self.http.config.concurrency.max(1)));
        let mut join_set = JoinSet::new();

        for (idx, directory) in directories.iter().cloned().enumerate() {
            let this = self.clone();
            let sem = sem.clone();
            join_set.spawn(async move {
                let _permit = sem.acquire_owned().await;
                let result = this.fetch_listing(&directory).await;
                (idx, directory, result)
            });
        }

        let mut fetched = Vec::with_capacity(directories.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, directory, Ok(runs))) => {
                    fetched.push((idx, DirectoryRuns { directory, runs }));
                }
                Ok((_, directory, Err(e))) => {
                    warn!(directory = %directory.name, error = %e, "excluding directory: listing fetch failed");
                }
                Err(e) => {
                    warn!(error = %e, "listing task failed");
                }
            }
        }

        fetched.sort_by_key(|(idx, _)| *idx);
        fetched.into_iter().map(|(_, d)| d).collect()
    }

    /// Directory by name from the discovery document.
    pub async fn find_directory(&self, name: &str) -> ViewerResult<Directory> {
        self.fetch_directories()
            .await?
            .into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ViewerError::NotFound {
                url: format!("{}#{}", discovery_url(&self.http.base_url), name),
            })
    }

    /// GET `{address}/results/{file}` as a suite document.
    pub async fn fetch_suite(&self, directory: &Directory, file_name: &str) -> ViewerResult<SuiteDetail> {
        let url = directory.result_url(file_name);
        debug!(url = %url, "fetching suite");

        let text = self.http.get_text(&url).await?;
        serde_json::from_str(&text).map_err(|e| ViewerError::Parse {
            source_name: url,
            line: Some(e.line()),
            message: e.to_string(),
        })
    }

    /// GET `{address}/results/{file}` as raw text.
    pub async fn fetch_text(&self, directory: &Directory, file_name: &str) -> ViewerResult<String> {
        let url = directory.result_url(file_name);
        debug!(url = %url, "fetching result file");
        self.http.get_text(&url).await
    }

    /// Read a byte window of `{address}/results/{file}` with a range request.
    pub async fn fetch_log_range(
        &self,
        directory: &Directory,
        file_name: &str,
        range: LogRange,
    ) -> ViewerResult<LogExcerpt> {
        let url = directory.result_url(file_name);
        debug!(url = %url, range = %range.header_value(), "fetching log range");

        let response = self.http.get_range(&url, range).await?;
        let partial = response.status() == StatusCode::PARTIAL_CONTENT;
        let total_size = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total);

        let body = response.bytes().await.map_err(|e| ViewerError::Network {
            message: format!("failed to read log body from {}: {}", url, e),
        })?;

        let (bytes, total_size) = if partial {
            (&body[..], total_size)
        } else {
            debug!(url = %url, "server ignored range, slicing locally");
            (range.slice(&body), Some(body.len() as u64))
        };

        Ok(LogExcerpt {
            content: String::from_utf8_lossy(bytes).into_owned(),
            url,
            range,
            partial,
            total_size,
        })
    }

    /// Details of one test case: inline details when present, otherwise the
    /// case's window of the suite's shared details log.
    pub async fn fetch_case_details(
        &self,
        directory: &Directory,
        suite: &SuiteDetail,
        case_id: &str,
    ) -> ViewerResult<String> {
        let case = suite
            .test_cases
            .get(case_id)
            .ok_or_else(|| ViewerError::NotFound {
                url: format!("{}#case-{}", suite.name, case_id),
            })?;

        if let Some(details) = &case.summary_result.details {
            return Ok(details.clone());
        }

        match (&suite.test_details_log, case.summary_result.log) {
            (Some(log_file), Some(offsets)) => {
                let range = offsets
                    .to_range()
                    .map_err(|e| ViewerError::from_core(e, log_file.as_str()))?;
                Ok(self.fetch_log_range(directory, log_file, range).await?.content)
            }
            _ => Ok(String::new()),
        }
    }
}
