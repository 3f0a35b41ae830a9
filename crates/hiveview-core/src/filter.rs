//! Text and tier filters for matrix views.

use crate::classify::HealthTier;
use crate::model::TestRun;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    text: Option<String>,
    tier: Option<HealthTier>,
}

impl RunFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on test name or any client name.
    /// Blank text matches everything.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_lowercase();
        self.text = (!text.is_empty()).then_some(text);
        self
    }

    pub fn with_tier(mut self, tier: HealthTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.tier.is_none()
    }

    pub fn matches(&self, run: &TestRun) -> bool {
        if let Some(tier) = self.tier {
            if run.health() != tier {
                return false;
            }
        }
        match &self.text {
            None => true,
            Some(needle) => {
                run.name.to_lowercase().contains(needle)
                    || run
                        .clients
                        .iter()
                        .any(|c| c.to_lowercase().contains(needle))
            }
        }
    }

    pub fn apply(&self, runs: &[TestRun]) -> Vec<TestRun> {
        runs.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
