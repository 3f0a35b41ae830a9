//! Health tier of a single run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::TestRun;

/// Pass ratio a failing run must exceed to count as a partial failure.
pub const PARTIAL_FAIL_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    /// No failing tests.
    AllPass,
    /// Some failures, but more than half of the tests pass.
    PartialFail,
    /// Half or more of the tests fail.
    MostlyFail,
}

impl HealthTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllPass => "pass",
            Self::PartialFail => "partial",
            Self::MostlyFail => "fail",
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a run. A run without tests has no ratio and can only be
/// `AllPass` (nothing failed) or `MostlyFail`.
pub fn classify(run: &TestRun) -> HealthTier {
    if run.fails == 0 {
        return HealthTier::AllPass;
    }
    match run.pass_ratio() {
        Some(ratio) if run.passes > 0 && ratio > PARTIAL_FAIL_RATIO => HealthTier::PartialFail,
        _ => HealthTier::MostlyFail,
    }
}

impl TestRun {
    pub fn health(&self) -> HealthTier {
        classify(self)
    }
}
