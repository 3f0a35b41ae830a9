//! Client configuration.

use serde::{Deserialize, Serialize};

/// Results client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Base URL serving `discovery.json`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for transient failures. Zero disables retry.
    #[serde(default)]
    pub max_retries: u32,

    /// Maximum concurrent listing fetches.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_concurrency() -> usize {
    8
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            concurrency: default_concurrency(),
        }
    }
}

impl ViewerConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `HIVEVIEW_URL` | Base URL serving `discovery.json` |
    /// | `HIVEVIEW_TIMEOUT` | Request timeout in seconds (default: 30) |
    /// | `HIVEVIEW_MAX_RETRIES` | Retries for transient failures (default: 0) |
    /// | `HIVEVIEW_CONCURRENCY` | Parallel listing fetches (default: 8) |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("HIVEVIEW_URL").unwrap_or(defaults.url),
            timeout_secs: std::env::var("HIVEVIEW_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_retries: std::env::var("HIVEVIEW_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            concurrency: std::env::var("HIVEVIEW_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.concurrency),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ViewerConfig::default()
            .with_url("https://hive.example.org")
            .with_timeout(5)
            .with_max_retries(2)
            .with_concurrency(0);

        assert_eq!(config.url, "https://hive.example.org");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"url":"http://h"}"#).unwrap();
        assert_eq!(config.url, "http://h");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.concurrency, 8);
    }
}
