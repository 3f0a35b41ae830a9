//! Read-only client for statically hosted hive test results.
//!
//! This crate fetches everything the viewer needs from a results server:
//!
//! - `discovery.json`: the list of result directories
//! - `{address}/listing.jsonl`: run history per directory
//! - `{address}/results/{file}`: suite documents and logs, with byte-range reads
//!
//! # Quick Start
//!
//! ```no_run
//! use hiveview_client::{ViewerClient, ViewerConfig};
//! use hiveview_core::{group_runs, GroupBy};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ViewerClient::new(ViewerConfig::default().with_url("https://hive.example.org"))?;
//!
//! let directories = client.fetch_directories().await?;
//! for listing in client.fetch_all_listings(&directories).await {
//!     let groups = group_runs(&listing.runs, GroupBy::Test);
//!     println!("{}: {} tests", listing.directory.name, groups.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `HIVEVIEW_URL` | Base URL serving `discovery.json` |
//! | `HIVEVIEW_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `HIVEVIEW_MAX_RETRIES` | Max retries for transient failures (default: 0) |
//! | `HIVEVIEW_CONCURRENCY` | Parallel listing fetches (default: 8) |

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{ViewerClient, VIEWER_USER_AGENT};
pub use config::ViewerConfig;
pub use error::{ViewerError, ViewerResult};
pub use types::{DirectoryRuns, LogExcerpt};
