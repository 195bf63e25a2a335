//! Unified exit codes for Tally.
//! These codes are part of the public contract and ensure consistent behavior across backends.

use std::fmt;

use tally_core::model::Report;

pub const SUCCESS: i32 = 0;
pub const TEST_FAILURE: i32 = 1; // Summary produced with one or more failed cases
pub const UNDETERMINED: i32 = 2; // No result source could be resolved

/// Exit-code compatibility switch. The historical adapters disagreed on what
/// an undetermined run should exit with; both behaviors stay selectable.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitCodePolicy {
    /// Legacy two-way policy: any non-pass condition exits 1.
    V1,
    /// Standard three-way policy: undetermined results exit 2, distinct from
    /// test failures.
    #[default]
    V2,
}

impl fmt::Display for ExitCodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCodePolicy::V1 => f.write_str("v1"),
            ExitCodePolicy::V2 => f.write_str("v2"),
        }
    }
}

/// Map a report to the process exit code.
///
/// The decision reads only the summary, never the backend's own exit status:
/// a green summary exits 0 even when the backend exited non-zero, and an
/// undetermined run never exits 0 regardless of the backend claiming success.
pub fn exit_code_for(report: &Report, policy: ExitCodePolicy) -> i32 {
    match &report.summary {
        Some(summary) if summary.is_green() => SUCCESS,
        Some(_) => TEST_FAILURE,
        None => match policy {
            ExitCodePolicy::V1 => TEST_FAILURE,
            ExitCodePolicy::V2 => UNDETERMINED,
        },
    }
}
