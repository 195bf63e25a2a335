//! Canonical result model shared by every backend.
//!
//! One `Report` per run, whatever produced the signal. Consumers branch on
//! `summary` being present, not on which backend ran.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for one execution. Namespaces the run's artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Collision-resistant identifier for callers that did not supply one.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
    /// Status field absent or empty in the source. Not a success.
    Unknown,
}

impl CaseStatus {
    /// Classify a raw status string against a backend's pass token.
    /// Comparison is case-insensitive; an absent or empty status is `Unknown`.
    pub fn classify(raw: Option<&str>, pass_token: &str) -> Self {
        match raw.map(str::trim) {
            None | Some("") => CaseStatus::Unknown,
            Some(s) if s.eq_ignore_ascii_case(pass_token) => CaseStatus::Pass,
            Some(_) => CaseStatus::Fail,
        }
    }

    pub fn is_passing(self) -> bool {
        matches!(self, CaseStatus::Pass)
    }
}

/// One discovered test case, in discovery order from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CaseResult {
    pub fn new(name: impl Into<String>, status: CaseStatus) -> Self {
        Self {
            name: name.into(),
            status,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Aggregated counts over a run's cases.
///
/// Invariant: `total == passed + failed`. `Unknown` cases count toward
/// `total` and are bucketed into `failed` — an unreadable status is never a
/// success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub tests: Vec<CaseResult>,
    /// Bounded prefix of the raw captured text, kept for human inspection
    /// when the summary came from the line scanner. The full text lives in
    /// the log artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Summary {
    /// Fold a case sequence into counts. The only way to build a `Summary`,
    /// so the counting invariant holds by construction.
    pub fn from_cases(tests: Vec<CaseResult>) -> Self {
        let passed = tests.iter().filter(|c| c.status.is_passing()).count();
        Self {
            total: tests.len(),
            passed,
            failed: tests.len() - passed,
            tests,
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// No failing (or unclassifiable) cases.
    pub fn is_green(&self) -> bool {
        self.failed == 0
    }
}

/// The canonical per-run report, persisted as JSON next to the log artifact.
///
/// `return_code` is always the backend's raw exit status; it is never derived
/// from the summary. The two signals are independent: a backend can exit 0
/// while its results file reports failures, and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "runId")]
    pub run_id: RunId,
    #[serde(rename = "returnCode")]
    pub return_code: i32,
    /// `None` when no result source produced any signal. Distinct from a
    /// summary with zero cases, which is a backend legitimately running
    /// nothing.
    pub summary: Option<Summary>,
    /// Log file name, relative to the output directory.
    pub log: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
