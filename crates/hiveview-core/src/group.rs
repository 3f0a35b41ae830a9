//! Latest-run-per-cell grouping of the (test × client combination) matrix.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model::TestRun;

/// Grouping axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group key is the test name; one run per client combination.
    #[default]
    Test,
    /// Group key is the client combination; one run per test name.
    Client,
}

impl GroupBy {
    pub fn primary_key(&self, run: &TestRun) -> String {
        match self {
            Self::Test => run.name.clone(),
            Self::Client => run.combo().key(),
        }
    }

    pub fn sub_key(&self, run: &TestRun) -> String {
        match self {
            Self::Test => run.combo().key(),
            Self::Client => run.name.clone(),
        }
    }

    /// The other axis.
    pub fn flip(&self) -> Self {
        match self {
            Self::Test => Self::Client,
            Self::Client => Self::Test,
        }
    }
}

/// Runs partitioned by group key, ordered by key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Groups {
    by: GroupBy,
    groups: BTreeMap<String, Vec<TestRun>>,
}

impl Groups {
    pub(crate) fn from_parts(by: GroupBy, groups: BTreeMap<String, Vec<TestRun>>) -> Self {
        Self { by, groups }
    }

    pub fn by(&self) -> GroupBy {
        self.by
    }

    pub fn get(&self, key: &str) -> Option<&[TestRun]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Like [`Groups::get`], reporting a missing key as an error.
    pub fn lookup(&self, key: &str) -> CoreResult<&[TestRun]> {
        self.get(key).ok_or_else(|| CoreError::GroupNotFound {
            key: key.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TestRun])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All selected runs, group by group.
    pub fn flatten(&self) -> Vec<&TestRun> {
        self.groups.values().flatten().collect()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<TestRun>> {
        self.groups
    }
}

/// Partition `runs` by the primary key of `by`, keeping only the latest run
/// per sub-key inside each group.
///
/// Within a group, runs appear in first-seen order of their sub-key. When two
/// runs of the same cell share a start time the first one seen is kept.
pub fn group_runs(runs: &[TestRun], by: GroupBy) -> Groups {
    let mut groups: BTreeMap<String, Vec<TestRun>> = BTreeMap::new();
    let mut cells: HashMap<(String, String), usize> = HashMap::new();

    for run in runs {
        let primary = by.primary_key(run);
        let sub = by.sub_key(run);
        let bucket = groups.entry(primary.clone()).or_default();

        match cells.entry((primary, sub)) {
            Entry::Occupied(slot) => {
                let kept = &mut bucket[*slot.get()];
                if run.start > kept.start {
                    *kept = run.clone();
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(bucket.len());
                bucket.push(run.clone());
            }
        }
    }

    Groups::from_parts(by, groups)
}

/// One run per (test, client combination) cell: the latest one.
pub fn latest_snapshot(runs: &[TestRun]) -> Vec<TestRun> {
    group_runs(runs, GroupBy::Test)
        .into_inner()
        .into_values()
        .flatten()
        .collect()
}
