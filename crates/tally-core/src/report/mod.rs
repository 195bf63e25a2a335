//! Report normalization and persistence.

pub mod console;

use std::path::Path;

use crate::backend::RawCapture;
use crate::errors::PersistError;
use crate::model::{Report, RunId, Summary};
use crate::scan;

/// Merge whichever result source succeeded with the capture's exit status.
///
/// Resolution order is strict: a structured summary, once obtained, is final
/// — the scanner is never consulted, even for a zero-case summary. Without a
/// structured source the capture text is scanned; a scan that found no
/// signal at all normalizes to `summary: None`, which is its own reportable
/// condition.
pub fn normalize(
    run_id: &RunId,
    capture: &RawCapture,
    structured: Option<Summary>,
    log: &str,
) -> Report {
    let summary = match structured {
        Some(summary) => Some(summary),
        None => {
            let scanned = scan::scan(&capture.text());
            if scanned.total > 0 {
                tracing::debug!(cases = scanned.total, "heuristic scan produced the summary");
                Some(scanned)
            } else {
                tracing::warn!("no result source produced any signal");
                None
            }
        }
    };

    Report {
        run_id: run_id.clone(),
        return_code: capture.status.code(),
        summary,
        log: log.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report(report: &Report, path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| PersistError::Write {
        what: "report",
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    std::fs::write(path, json).map_err(|source| PersistError::Write {
        what: "report",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ProcessStatus;
    use crate::model::{CaseResult, CaseStatus};

    fn capture(text: &str, status: ProcessStatus) -> RawCapture {
        RawCapture {
            output: text.as_bytes().to_vec(),
            status,
        }
    }

    #[test]
    fn structured_summary_wins_even_when_empty() {
        // Capture text that the scanner would happily count; the structured
        // zero-case summary must still be taken as-is.
        let cap = capture("TEST alpha PASS\n", ProcessStatus::Exited(0));
        let structured = Summary::from_cases(vec![]);
        let report = normalize(&RunId::from("r"), &cap, Some(structured), "log-r.txt");
        let summary = report.summary.unwrap();
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn falls_back_to_scan_when_no_structured_source() {
        let cap = capture(
            "running TEST alpha ... PASS\nrunning TEST beta ... FAIL\n",
            ProcessStatus::Exited(0),
        );
        let report = normalize(&RunId::from("r"), &cap, None, "log-r.txt");
        let summary = report.summary.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        // exit status is surfaced independently of the counted failures
        assert_eq!(report.return_code, 0);
    }

    #[test]
    fn no_signal_at_all_yields_null_summary() {
        let cap = capture("nothing to see here\n", ProcessStatus::Exited(0));
        let report = normalize(&RunId::from("r"), &cap, None, "log-r.txt");
        assert!(report.summary.is_none());
    }

    #[test]
    fn launch_failure_keeps_its_sentinel_code() {
        let cap = capture(
            "ERROR launching backend ./missing: not found\n",
            ProcessStatus::LaunchFailed,
        );
        let report = normalize(&RunId::from("r"), &cap, None, "log-r.txt");
        assert_eq!(report.return_code, 2);
        assert!(report.summary.is_none());
    }

    #[test]
    fn structured_failures_survive_a_green_exit_code() {
        let cap = capture("", ProcessStatus::Exited(0));
        let structured = Summary::from_cases(vec![
            CaseResult::new("a", CaseStatus::Pass),
            CaseResult::new("b", CaseStatus::Fail),
        ]);
        let report = normalize(&RunId::from("r"), &cap, Some(structured), "log-r.txt");
        assert_eq!(report.return_code, 0);
        assert_eq!(report.summary.unwrap().failed, 1);
    }

    #[test]
    fn write_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report-r.json");
        let cap = capture("TEST ok PASS\n", ProcessStatus::Exited(0));
        let report = normalize(&RunId::from("r"), &cap, None, "log-r.txt");
        write_report(&report, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["runId"], "r");
        assert_eq!(v["summary"]["total"], 1);
    }
}
