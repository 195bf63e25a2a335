//! Backend invocation and output capture.
//!
//! Every backend reduces to one synchronous child process: a compiled test
//! executable invoked directly, or a framework runner prepared by a
//! [`SuiteDriver`]. The capture is plain data — launch failure included —
//! so the rest of the pipeline never has to handle a spawn error.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::dialect::Dialect;

/// Exit code reported when the backend process could not be started.
/// Distinct from any test-failure signal: abnormal, not a red suite.
pub const LAUNCH_FAILURE_CODE: i32 = 2;

/// One backend invocation: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Terminal status of one backend process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Exited(i32),
    /// The process never started (missing binary, permission denied).
    LaunchFailed,
}

impl ProcessStatus {
    /// Numeric code for the report. Launch failure keeps its sentinel.
    pub fn code(self) -> i32 {
        match self {
            ProcessStatus::Exited(code) => code,
            ProcessStatus::LaunchFailed => LAUNCH_FAILURE_CODE,
        }
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ProcessStatus::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ProcessStatus::Exited(128 + sig);
            }
        }
        ProcessStatus::Exited(-1)
    }
}

/// Combined stdout/stderr bytes plus the terminal status of one run.
/// Immutable once capture completes.
#[derive(Debug, Clone)]
pub struct RawCapture {
    pub output: Vec<u8>,
    pub status: ProcessStatus,
}

impl RawCapture {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Run one invocation to completion, capturing everything it writes.
///
/// Blocks until the child exits; no timeout is enforced. Launch failure is
/// folded into the capture as a diagnostic line with the sentinel status, so
/// this function has no error path.
pub fn run_invocation(invocation: &Invocation) -> RawCapture {
    tracing::debug!(program = %invocation.program.display(), "spawning backend");
    let result = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .output();

    match result {
        Ok(out) => {
            // stdout first, then stderr; per-stream ordering is preserved.
            let mut bytes = out.stdout;
            bytes.extend_from_slice(&out.stderr);
            RawCapture {
                output: bytes,
                status: ProcessStatus::from(out.status),
            }
        }
        Err(e) => {
            tracing::warn!(
                program = %invocation.program.display(),
                error = %e,
                "backend failed to launch"
            );
            let msg = format!(
                "ERROR launching backend {}: {}\n",
                invocation.program.display(),
                e
            );
            RawCapture {
                output: msg.into_bytes(),
                status: ProcessStatus::LaunchFailed,
            }
        }
    }
}

/// The framework-driver seam.
///
/// A driver knows how to run a test suite so that its framework writes a
/// machine-readable results file, and which [`Dialect`] that file speaks.
/// New frameworks implement this trait; the pipeline stays unchanged.
pub trait SuiteDriver {
    fn name(&self) -> &str;

    /// The invocation that runs `suite` and writes results to `results`.
    fn invocation(&self, suite: &Path, results: &Path) -> Invocation;

    fn dialect(&self) -> Dialect;
}

/// Robot Framework driver. Shells out to the `robot` entry point and
/// suppresses its HTML log/report artifacts; only the results XML is wanted.
#[derive(Debug, Clone)]
pub struct RobotDriver {
    pub program: PathBuf,
}

impl Default for RobotDriver {
    fn default() -> Self {
        Self {
            program: PathBuf::from("robot"),
        }
    }
}

impl SuiteDriver for RobotDriver {
    fn name(&self) -> &str {
        "robot"
    }

    fn invocation(&self, suite: &Path, results: &Path) -> Invocation {
        Invocation::new(self.program.clone()).with_args([
            "--output".to_string(),
            results.display().to_string(),
            "--log".to_string(),
            "NONE".to_string(),
            "--report".to_string(),
            "NONE".to_string(),
            suite.display().to_string(),
        ])
    }

    fn dialect(&self) -> Dialect {
        Dialect::robot()
    }
}
