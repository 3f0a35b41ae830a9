//! Per-directory rollup over the latest matrix snapshot.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::{is_inactive, most_recent};
use crate::classify::HealthTier;
use crate::group::latest_snapshot;
use crate::model::{Directory, TestRun};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub all_pass: usize,
    pub partial_fail: usize,
    pub mostly_fail: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: HealthTier) {
        match tier {
            HealthTier::AllPass => self.all_pass += 1,
            HealthTier::PartialFail => self.partial_fail += 1,
            HealthTier::MostlyFail => self.mostly_fail += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.all_pass + self.partial_fail + self.mostly_fail
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorySummary {
    pub name: String,
    pub address: String,
    /// All runs in the listing.
    pub runs: usize,
    pub tests: usize,
    pub client_combos: usize,
    /// Tiers of the latest run per (test, client combination).
    pub tiers: TierCounts,
    pub latest: Option<DateTime<Utc>>,
    pub inactive: bool,
}

pub fn summarize(directory: &Directory, runs: &[TestRun], now: DateTime<Utc>) -> DirectorySummary {
    let tests: BTreeSet<&str> = runs.iter().map(|r| r.name.as_str()).collect();
    let combos: BTreeSet<String> = runs.iter().map(|r| r.combo().key()).collect();

    let mut tiers = TierCounts::default();
    for run in latest_snapshot(runs) {
        tiers.record(run.health());
    }

    let newest = most_recent(runs);

    DirectorySummary {
        name: directory.name.clone(),
        address: directory.address.clone(),
        runs: runs.len(),
        tests: tests.len(),
        client_combos: combos.len(),
        tiers,
        latest: newest.map(|r| r.start),
        inactive: is_inactive(newest, now),
    }
}
