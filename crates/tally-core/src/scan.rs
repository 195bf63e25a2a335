//! Heuristic line scanner, the fallback result source.
//!
//! Best-effort and low-precision by contract: it keys on conventional
//! pass/fail markers in free-form output and can both under- and over-count.
//! It exists so a backend with no structured results still yields a usable
//! report. It never fails — text with no matching lines folds to an all-zero
//! summary.

use crate::model::{CaseResult, CaseStatus, Summary};

/// How much raw text the summary retains for human inspection. The full
/// capture already lives in the log artifact.
pub const RAW_PREFIX_CHARS: usize = 2000;

/// A line signals a result when it mentions a test ("test", any case) next
/// to a literal `PASS` or `FAIL` marker. `PASS` wins when both markers
/// appear on one line.
fn classify_line(line: &str) -> Option<CaseStatus> {
    if !line.to_ascii_uppercase().contains("TEST") {
        return None;
    }
    if line.contains("PASS") {
        Some(CaseStatus::Pass)
    } else if line.contains("FAIL") {
        Some(CaseStatus::Fail)
    } else {
        None
    }
}

/// Fold captured text into a [`Summary`], one case per signaling line in
/// first-seen order. The trimmed line stands in for the case name; the
/// backend's own naming is unknowable here.
pub fn scan(text: &str) -> Summary {
    let cases: Vec<CaseResult> = text
        .lines()
        .filter_map(|line| classify_line(line).map(|status| CaseResult::new(line.trim(), status)))
        .collect();

    Summary::from_cases(cases).with_raw(raw_prefix(text))
}

fn raw_prefix(text: &str) -> String {
    text.chars().take(RAW_PREFIX_CHARS).collect()
}
