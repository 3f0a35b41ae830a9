//! Ordering of runs and grouped runs.
//!
//! All sorts are stable and return new sequences.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::group::{GroupBy, Groups};
use crate::model::TestRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Client list when grouped by test, test name when grouped by client.
    #[default]
    Name,
    /// Pass ratio, highest first. Runs without tests go last.
    Coverage,
    /// Start time, newest first.
    Time,
}

fn compare(a: &TestRun, b: &TestRun, sort: SortBy, context: GroupBy) -> Ordering {
    match sort {
        SortBy::Name => match context {
            GroupBy::Test => a.combo().sort_label().cmp(&b.combo().sort_label()),
            GroupBy::Client => a.name.cmp(&b.name),
        },
        SortBy::Coverage => {
            let ra = a.pass_ratio().unwrap_or(-1.0);
            let rb = b.pass_ratio().unwrap_or(-1.0);
            rb.total_cmp(&ra)
        }
        SortBy::Time => b.start.cmp(&a.start),
    }
}

/// Sort `runs` for display inside a grouping of type `context`.
pub fn sort_runs(runs: &[TestRun], sort: SortBy, context: GroupBy) -> Vec<TestRun> {
    let mut sorted = runs.to_vec();
    sorted.sort_by(|a, b| compare(a, b, sort, context));
    sorted
}

/// Apply [`sort_runs`] inside every group.
pub fn sort_groups(groups: &Groups, sort: SortBy) -> Groups {
    let by = groups.by();
    let sorted = groups
        .iter()
        .map(|(key, runs)| (key.to_string(), sort_runs(runs, sort, by)))
        .collect();
    Groups::from_parts(by, sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_runs;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn sample() -> Vec<TestRun> {
        vec![
            TestRun::new("rpc", ["reth"], day(3), 5, 5),
            TestRun::new("engine", ["geth", "lighthouse"], day(1), 9, 1),
            TestRun::new("sync", ["besu"], day(2), 10, 0),
            TestRun::new("empty", ["erigon"], day(4), 0, 0),
        ]
    }

    fn names(runs: &[TestRun]) -> Vec<&str> {
        runs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_name_sort_depends_on_grouping() {
        let runs = sample();
        let by_clients = sort_runs(&runs, SortBy::Name, GroupBy::Test);
        assert_eq!(names(&by_clients), vec!["sync", "empty", "engine", "rpc"]);

        let by_test = sort_runs(&runs, SortBy::Name, GroupBy::Client);
        assert_eq!(names(&by_test), vec!["empty", "engine", "rpc", "sync"]);
    }

    #[test]
    fn test_coverage_sort_descending_empty_last() {
        let sorted = sort_runs(&sample(), SortBy::Coverage, GroupBy::Test);
        assert_eq!(names(&sorted), vec!["sync", "engine", "rpc", "empty"]);
    }

    #[test]
    fn test_time_sort_newest_first() {
        let sorted = sort_runs(&sample(), SortBy::Time, GroupBy::Test);
        assert_eq!(names(&sorted), vec!["empty", "rpc", "sync", "engine"]);
    }

    #[test]
    fn test_sort_is_stable_and_non_mutating() {
        let runs = vec![
            TestRun::new("a", ["geth"], day(1), 1, 1).with_file_name("1"),
            TestRun::new("b", ["geth"], day(1), 2, 2).with_file_name("2"),
            TestRun::new("c", ["geth"], day(1), 3, 3).with_file_name("3"),
        ];
        let sorted = sort_runs(&runs, SortBy::Coverage, GroupBy::Test);
        let files: Vec<&str> = sorted.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(files, vec!["1", "2", "3"]);
        assert_eq!(runs[0].name, "a");
    }

    #[test]
    fn test_sort_groups_sorts_each_group() {
        let runs = vec![
            TestRun::new("T1", ["reth"], day(1), 1, 0),
            TestRun::new("T1", ["geth"], day(2), 1, 0),
        ];
        let groups = group_runs(&runs, GroupBy::Test);
        let sorted = sort_groups(&groups, SortBy::Name);
        let keys: Vec<String> = sorted.get("T1").unwrap().iter().map(|r| r.combo().key()).collect();
        assert_eq!(keys, vec!["geth", "reth"]);
        assert_eq!(sorted.by(), GroupBy::Test);
    }
}
