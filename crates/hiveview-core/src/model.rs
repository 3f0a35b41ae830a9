//! Data model for discovery, listings and suite detail documents.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Serde helper: run start times appear as RFC 3339, naive datetimes or bare dates.
mod serde_start {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid start time: {raw}")))
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Parse a run start time in any of the accepted listing formats.
pub fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    serde_start::parse(raw)
}

/// A test-suite source: a named base URL hosting `listing.jsonl` and `results/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub name: String,
    pub address: String,
}

impl Directory {
    /// Create a directory, dropping any trailing slash from the address.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        let address: String = address.into();
        Self {
            name: name.into(),
            address: address.trim_end_matches('/').to_string(),
        }
    }

    pub fn listing_url(&self) -> String {
        format!("{}/listing.jsonl", self.address)
    }

    pub fn result_url(&self, file_name: &str) -> String {
        format!("{}/results/{}", self.address, file_name.trim_start_matches('/'))
    }
}

/// Canonical identity of a client combination.
///
/// Client names are sorted on construction, so `["b", "a"]` and `["a", "b"]`
/// are the same combination. All grouping, lookup and display goes through
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClientCombo {
    clients: Vec<String>,
}

impl ClientCombo {
    pub fn new<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut clients: Vec<String> = clients.into_iter().map(Into::into).collect();
        clients.sort();
        Self { clients }
    }

    /// Parse a `+`-joined key back into a combination.
    pub fn from_key(key: &str) -> Self {
        Self::new(key.split('+').map(str::trim).filter(|s| !s.is_empty()))
    }

    /// Group key: sorted client names joined by `+`.
    pub fn key(&self) -> String {
        self.clients.join("+")
    }

    /// Comma-separated list, used when ordering by name.
    pub fn sort_label(&self) -> String {
        self.clients.join(",")
    }

    pub fn clients(&self) -> &[String] {
        &self.clients
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl fmt::Display for ClientCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// One recorded suite execution, as listed in `listing.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    /// Suite (test) name.
    pub name: String,

    /// Clients exercised by the run, in listing order.
    #[serde(default)]
    pub clients: Vec<String>,

    #[serde(deserialize_with = "serde_start::deserialize")]
    pub start: DateTime<Utc>,

    #[serde(default)]
    pub passes: u64,

    #[serde(default)]
    pub fails: u64,

    /// Number of test cases. Filled from `passes + fails` when absent.
    #[serde(default)]
    pub ntests: u64,

    /// Suite file under `results/`.
    #[serde(default)]
    pub file_name: String,

    /// Whether the simulator hit its timeout.
    #[serde(default)]
    pub timeout: bool,

    /// Client name to version string.
    #[serde(default)]
    pub versions: BTreeMap<String, String>,

    /// Size of the suite file in bytes.
    #[serde(default)]
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_log: Option<String>,

    /// Listing sort key (unix seconds), when the server provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl TestRun {
    pub fn new<I, S>(
        name: impl Into<String>,
        clients: I,
        start: DateTime<Utc>,
        passes: u64,
        fails: u64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            clients: clients.into_iter().map(Into::into).collect(),
            start,
            passes,
            fails,
            ntests: passes.saturating_add(fails),
            file_name: String::new(),
            timeout: false,
            versions: BTreeMap::new(),
            size: 0,
            sim_log: None,
            timestamp: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Fill `ntests` when the listing omitted it.
    pub fn normalized(mut self) -> Self {
        if self.ntests == 0 {
            self.ntests = self.total();
        }
        self
    }

    pub fn combo(&self) -> ClientCombo {
        ClientCombo::new(self.clients.iter().cloned())
    }

    /// `passes + fails`, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.passes.saturating_add(self.fails)
    }

    /// `passes + fails`, or `None` when the counts overflow.
    pub fn checked_total(&self) -> Option<u64> {
        self.passes.checked_add(self.fails)
    }

    pub fn is_consistent(&self) -> bool {
        self.ntests == self.total()
    }

    /// Fraction of passing tests, `None` when the run has no tests.
    pub fn pass_ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.passes as f64 / total as f64),
        }
    }

    /// Key used to order a listing newest-first.
    pub fn sort_timestamp(&self) -> i64 {
        self.timestamp.unwrap_or_else(|| self.start.timestamp())
    }
}

/// Parsed `results/{fileName}` document for one suite run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteDetail {
    #[serde(default)]
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub client_versions: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim_log: Option<String>,

    /// Shared log file that test case offsets point into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_details_log: Option<String>,

    #[serde(default)]
    pub test_cases: BTreeMap<String, TestCase>,
}

impl SuiteDetail {
    /// Test cases ordered by numeric id (string order for non-numeric ids).
    pub fn cases_in_order(&self) -> Vec<(&str, &TestCase)> {
        let mut cases: Vec<(&str, &TestCase)> = self
            .test_cases
            .iter()
            .map(|(id, case)| (id.as_str(), case))
            .collect();
        cases.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        });
        cases
    }

    pub fn passes(&self) -> usize {
        self.test_cases
            .values()
            .filter(|c| c.summary_result.pass)
            .count()
    }

    pub fn fails(&self) -> usize {
        self.test_cases.len() - self.passes()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end: Option<DateTime<Utc>>,

    pub summary_result: SummaryResult,

    #[serde(default)]
    pub client_info: BTreeMap<String, ClientInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub pass: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Location of the details in the suite's shared log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogOffsets>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub ip: String,

    pub name: String,

    #[serde(default)]
    pub instantiated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub log_file: String,
}

/// Byte offsets into a log file as stored in suite documents (`end` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogOffsets {
    pub begin: u64,
    pub end: u64,
}

impl LogOffsets {
    pub fn to_range(self) -> CoreResult<LogRange> {
        LogRange::new(self.begin, self.end)
    }
}

/// Non-empty half-open byte window `[begin, end)` of a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogRange {
    begin: u64,
    end: u64,
}

impl LogRange {
    pub fn new(begin: u64, end: u64) -> CoreResult<Self> {
        if end <= begin {
            return Err(CoreError::InvalidRange { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> u64 {
        self.begin
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// `Range` header value; HTTP byte ranges are inclusive.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.begin, self.end - 1)
    }

    /// Cut the window out of a full body, for servers that ignore `Range`.
    pub fn slice<'a>(&self, body: &'a [u8]) -> &'a [u8] {
        let len = body.len() as u64;
        let begin = self.begin.min(len) as usize;
        let end = self.end.min(len) as usize;
        &body[begin..end]
    }
}
