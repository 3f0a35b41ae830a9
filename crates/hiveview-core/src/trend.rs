//! Pass-ratio trend across the run history of one (test, client combination).

use serde::{Deserialize, Serialize};

use crate::model::{ClientCombo, TestRun};

/// Number of most recent runs considered for a trend.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Smallest pass-ratio change that produces an indicator (1%).
pub const TREND_DEAD_ZONE: f64 = 0.01;

// Absorbs float noise so that an exact 1% step counts.
const RATIO_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    /// No indicator: change inside the dead zone, or a ratio is undefined.
    Flat,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => " ",
        }
    }
}

pub fn trend_between(newer: Option<f64>, older: Option<f64>) -> Trend {
    let (Some(newer), Some(older)) = (newer, older) else {
        return Trend::Flat;
    };
    let delta = newer - older;
    if delta.abs() + RATIO_EPSILON < TREND_DEAD_ZONE {
        Trend::Flat
    } else if delta > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

/// Indicators for a newest-first history: entry `i` compares `history[i]`
/// with `history[i + 1]`. The oldest run gets no entry.
pub fn compute_trends(history: &[TestRun]) -> Vec<Trend> {
    history
        .windows(2)
        .map(|pair| trend_between(pair[0].pass_ratio(), pair[1].pass_ratio()))
        .collect()
}

/// Newest-first history of `test` on `combo`, capped at `window` runs.
pub fn history_for(runs: &[TestRun], test: &str, combo: &ClientCombo, window: usize) -> Vec<TestRun> {
    let mut history: Vec<TestRun> = runs
        .iter()
        .filter(|r| r.name == test && &r.combo() == combo)
        .cloned()
        .collect();
    history.sort_by(|a, b| b.start.cmp(&a.start));
    history.truncate(window);
    history
}
