//! Parsers for `discovery.json` and `listing.jsonl`.

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::model::{Directory, TestRun};

/// Parse a JSONL listing into runs, newest first.
///
/// Blank lines are skipped. A single malformed record fails the whole
/// listing.
pub fn parse_listing(text: &str) -> CoreResult<Vec<TestRun>> {
    let mut runs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let run: TestRun = serde_json::from_str(line).map_err(|e| CoreError::InvalidListing {
            line: idx + 1,
            message: e.to_string(),
        })?;
        if run.checked_total().is_none() {
            return Err(CoreError::InvalidListing {
                line: idx + 1,
                message: format!("passes + fails overflows for {}", run.name),
            });
        }
        runs.push(run.normalized());
    }
    runs.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp()));
    debug!(runs = runs.len(), "parsed listing");
    Ok(runs)
}

#[derive(Deserialize)]
struct DiscoveryEntry {
    name: String,
    address: String,
}

/// Parse the discovery document: a JSON array of `{name, address}`.
pub fn parse_discovery(text: &str) -> CoreResult<Vec<Directory>> {
    let entries: Vec<DiscoveryEntry> =
        serde_json::from_str(text).map_err(|e| CoreError::InvalidDiscovery {
            message: e.to_string(),
        })?;
    Ok(entries
        .into_iter()
        .map(|e| Directory::new(e.name, e.address))
        .collect())
}
