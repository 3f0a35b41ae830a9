//! Result types returned by the client.

use serde::Serialize;

use hiveview_core::{Directory, LogRange, TestRun};

/// A directory together with its parsed listing (newest run first).
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryRuns {
    pub directory: Directory,
    pub runs: Vec<TestRun>,
}

/// A window of a log file.
#[derive(Debug, Clone, Serialize)]
pub struct LogExcerpt {
    /// URL the excerpt was read from.
    pub url: String,

    pub range: LogRange,

    /// True when the server answered 206; false when the full body was
    /// returned and sliced locally.
    pub partial: bool,

    /// Full size of the file, when the server reported it.
    pub total_size: Option<u64>,

    /// Excerpt text (invalid UTF-8 replaced).
    pub content: String,
}
