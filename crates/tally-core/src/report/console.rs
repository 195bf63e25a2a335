//! Human-readable run summary on stderr. stdout stays reserved for the
//! report-path contract.

use crate::model::{CaseStatus, Report};

pub fn print_summary(report: &Report) {
    let Some(summary) = &report.summary else {
        eprintln!(
            "No test results could be determined (backend exit code {}). See {}",
            report.return_code, report.log
        );
        return;
    };

    eprintln!();
    for case in &summary.tests {
        let icon = match case.status {
            CaseStatus::Pass => "✅",
            CaseStatus::Fail => "❌",
            CaseStatus::Unknown => "⚠️ ",
        };
        match &case.message {
            Some(message) => eprintln!("{} {:<30} {}", icon, case.name, message),
            None => eprintln!("{} {}", icon, case.name),
        }
    }

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "Summary: {} passed, {} failed, {} total (backend exit code {})",
        summary.passed, summary.failed, summary.total, report.return_code
    );
}
