//! Error types for listing parsing and view lookups.

/// Core errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A line of `listing.jsonl` is not a valid run record.
    #[error("invalid listing record at line {line}: {message}")]
    InvalidListing { line: usize, message: String },

    /// `discovery.json` could not be parsed.
    #[error("invalid discovery document: {message}")]
    InvalidDiscovery { message: String },

    /// Requested group key does not exist in the current grouping.
    #[error("group not found: {key}")]
    GroupNotFound { key: String },

    /// Byte range is empty or inverted.
    #[error("invalid byte range: {begin}..{end}")]
    InvalidRange { begin: u64, end: u64 },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
