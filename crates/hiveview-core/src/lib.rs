//! Result aggregation for hive-style test matrices.
//!
//! Everything in this crate is a pure function over immutable run records:
//!
//! - [`classify`]: health tier of a single run (all pass / partial / mostly fail)
//! - [`group`]: latest run per (test, client combination) cell, keyed by either axis
//! - [`sort`]: ordering by name, coverage ratio or recency
//! - [`trend`]: up/down indicators across a run history
//! - [`activity`]: inactivity detection and active-first ordering
//!
//! Fetching lives in `hiveview-client`; rendering lives in the CLI.
//!
//! # Quick Start
//!
//! ```
//! use hiveview_core::{group_runs, parse_listing, GroupBy, HealthTier};
//!
//! let listing = r#"{"name":"T1","clients":["geth"],"start":"2024-01-01","passes":10,"fails":0}
//! {"name":"T1","clients":["geth"],"start":"2024-01-02","passes":8,"fails":2}"#;
//!
//! let runs = parse_listing(listing).unwrap();
//! let groups = group_runs(&runs, GroupBy::Test);
//! let cell = &groups.get("T1").unwrap()[0];
//! assert_eq!(cell.health(), HealthTier::PartialFail);
//! ```

pub mod activity;
pub mod classify;
pub mod error;
pub mod filter;
pub mod group;
pub mod listing;
pub mod model;
pub mod popover;
pub mod sort;
pub mod summary;
pub mod theme;
pub mod trend;

pub use activity::{is_inactive, is_stale, most_recent, order_by_activity, INACTIVITY_THRESHOLD_DAYS};
pub use classify::{classify, HealthTier};
pub use error::{CoreError, CoreResult};
pub use filter::RunFilter;
pub use group::{group_runs, latest_snapshot, GroupBy, Groups};
pub use listing::{parse_discovery, parse_listing};
pub use model::{
    ClientCombo, ClientInfo, Directory, LogOffsets, LogRange, SuiteDetail, SummaryResult, TestCase,
    TestRun,
};
pub use popover::Popover;
pub use sort::{sort_groups, sort_runs, SortBy};
pub use summary::{summarize, DirectorySummary, TierCounts};
pub use theme::{Subscription, Theme, ThemeContext};
pub use trend::{compute_trends, history_for, trend_between, Trend, DEFAULT_HISTORY_WINDOW, TREND_DEAD_ZONE};
