//! Error types for the results client.

use std::time::Duration;

use hiveview_core::CoreError;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Resource does not exist on the results server.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Non-success HTTP status other than 404/416/429.
    #[error("HTTP {status} for {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Connection, timeout or body read failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// Malformed JSON or JSONL document.
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        line: Option<usize>,
        message: String,
    },

    /// Requested byte range is empty or not satisfiable.
    #[error("invalid byte range: {message}")]
    InvalidRange { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ViewerError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::Config { .. } => 2,
            Self::InvalidRange { .. } => 2,
            Self::Parse { .. } => 3,
            Self::Http { .. } => 4,
            Self::RateLimited { .. } => 4,
            Self::Network { .. } => 4,
        }
    }

    /// Whether the error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Wrap a core parse error with the document it came from.
    pub(crate) fn from_core(err: CoreError, source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        match err {
            CoreError::InvalidListing { line, message } => Self::Parse {
                source_name,
                line: Some(line),
                message,
            },
            CoreError::InvalidRange { begin, end } => Self::InvalidRange {
                message: format!("{begin}..{end}"),
            },
            other => Self::Parse {
                source_name,
                line: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ViewerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for client operations.
pub type ViewerResult<T> = Result<T, ViewerError>;
