//! Run coordination: one backend execution, start to persisted report.

use std::path::PathBuf;

use crate::backend::{self, Invocation, SuiteDriver};
use crate::dialect::Dialect;
use crate::errors::PersistError;
use crate::model::{Report, RunId};
use crate::{report, structured};

/// What to run. Either a compiled test executable invoked directly, or a
/// suite handed to a framework driver that knows its own results format.
pub enum Backend {
    Executable {
        invocation: Invocation,
        /// Where the backend is expected to write structured results, if
        /// anywhere.
        results: Option<PathBuf>,
        dialect: Dialect,
    },
    Suite {
        driver: Box<dyn SuiteDriver>,
        suite: PathBuf,
    },
}

pub struct RunRequest {
    pub backend: Backend,
    pub output_dir: PathBuf,
    /// Caller-supplied identifier; generated when absent.
    pub run_id: Option<RunId>,
}

/// A completed run: the report plus where its artifacts landed.
pub struct RunArtifacts {
    pub report: Report,
    pub report_path: PathBuf,
    pub log_path: PathBuf,
}

/// Execute one run: spawn, capture, persist the log, resolve a result
/// source, persist the report.
///
/// Backend trouble (launch failure, malformed results) is absorbed into the
/// report; only filesystem persistence can fail this function.
pub fn execute(request: RunRequest) -> Result<RunArtifacts, PersistError> {
    let run_id = request.run_id.unwrap_or_else(RunId::generate);
    let output_dir = request.output_dir;

    std::fs::create_dir_all(&output_dir).map_err(|source| PersistError::CreateDir {
        path: output_dir.clone(),
        source,
    })?;

    let (invocation, results_path, dialect) = match request.backend {
        Backend::Executable {
            invocation,
            results,
            dialect,
        } => (invocation, results, dialect),
        Backend::Suite { driver, suite } => {
            let results = output_dir.join(format!("output-{run_id}.xml"));
            let invocation = driver.invocation(&suite, &results);
            (invocation, Some(results), driver.dialect())
        }
    };

    tracing::info!(
        run_id = %run_id,
        program = %invocation.program.display(),
        "starting run"
    );
    let capture = backend::run_invocation(&invocation);

    // Persist the raw capture before any parsing: the log must exist even
    // when no summary can be determined.
    let log_name = format!("log-{run_id}.txt");
    let log_path = output_dir.join(&log_name);
    std::fs::write(&log_path, &capture.output).map_err(|source| PersistError::Write {
        what: "log",
        path: log_path.clone(),
        source,
    })?;

    let structured = match structured::resolve(results_path.as_deref(), &dialect) {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!(error = %err, "structured results unusable, falling back to line scan");
            None
        }
    };

    let report = report::normalize(&run_id, &capture, structured, &log_name);
    let report_path = output_dir.join(format!("report-{run_id}.json"));
    report::write_report(&report, &report_path)?;

    tracing::info!(
        report = %report_path.display(),
        log = %log_path.display(),
        "run complete"
    );

    Ok(RunArtifacts {
        report,
        report_path,
        log_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn executable(invocation: Invocation, results: Option<PathBuf>) -> Backend {
        Backend::Executable {
            invocation,
            results,
            dialect: Dialect::qtest(),
        }
    }

    #[cfg(unix)]
    fn sh(script: &str) -> Invocation {
        Invocation::new("/bin/sh").with_args(["-c", script])
    }

    #[cfg(unix)]
    #[test]
    fn run_persists_log_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = execute(RunRequest {
            backend: executable(sh("echo 'TEST alpha PASS'; echo 'TEST beta FAIL'"), None),
            output_dir: dir.path().to_path_buf(),
            run_id: Some(RunId::from("r1")),
        })
        .unwrap();

        assert_eq!(artifacts.log_path, dir.path().join("log-r1.txt"));
        assert_eq!(artifacts.report_path, dir.path().join("report-r1.json"));
        let log = std::fs::read_to_string(&artifacts.log_path).unwrap();
        assert!(log.contains("TEST alpha PASS"));

        let summary = artifacts.report.summary.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(artifacts.report.log, "log-r1.txt");
    }

    #[cfg(unix)]
    #[test]
    fn structured_results_take_precedence_over_output_text() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results.xml");
        std::fs::write(
            &results,
            r#"<TestRun><TestCase name="only"><Result>pass</Result></TestCase></TestRun>"#,
        )
        .unwrap();

        let artifacts = execute(RunRequest {
            backend: executable(sh("echo 'TEST noise FAIL'"), Some(results)),
            output_dir: dir.path().join("out"),
            run_id: None,
        })
        .unwrap();

        let summary = artifacts.report.summary.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.tests[0].name, "only");
    }

    #[cfg(unix)]
    #[test]
    fn malformed_results_fall_back_to_line_scan() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results.xml");
        std::fs::write(&results, "<TestRun><TestCase").unwrap();

        let artifacts = execute(RunRequest {
            backend: executable(sh("echo 'TEST salvage PASS'"), Some(results)),
            output_dir: dir.path().to_path_buf(),
            run_id: Some(RunId::from("r2")),
        })
        .unwrap();

        let summary = artifacts.report.summary.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.passed, 1);
    }

    #[test]
    fn launch_failure_still_produces_log_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = execute(RunRequest {
            backend: executable(Invocation::new("/definitely/not/here"), None),
            output_dir: dir.path().to_path_buf(),
            run_id: Some(RunId::from("r3")),
        })
        .unwrap();

        let log = std::fs::read_to_string(&artifacts.log_path).unwrap();
        assert!(log.contains("ERROR launching backend"));
        assert!(artifacts.report.summary.is_none());
        assert_eq!(artifacts.report.return_code, 2);
        assert!(artifacts.report_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn concurrent_style_runs_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let run = |id: &str| {
            execute(RunRequest {
                backend: executable(sh("echo 'TEST one PASS'"), None),
                output_dir: dir.path().to_path_buf(),
                run_id: Some(RunId::from(id)),
            })
            .unwrap()
        };
        let a = run("a");
        let b = run("b");
        assert_ne!(a.report_path, b.report_path);
        assert!(a.report_path.exists());
        assert!(b.report_path.exists());
        assert_eq!(a.report.summary.unwrap().total, 1);
        assert_eq!(b.report.summary.unwrap().total, 1);
    }

    #[cfg(unix)]
    #[test]
    fn suite_backend_reads_what_the_driver_wrote() {
        // A driver whose "framework" is a shell one-liner writing results XML.
        struct FakeDriver;
        impl SuiteDriver for FakeDriver {
            fn name(&self) -> &str {
                "fake"
            }
            fn invocation(&self, _suite: &Path, results: &Path) -> Invocation {
                let script = format!(
                    "printf '<robot><test name=\"t1\"><status status=\"PASS\"></status></test></robot>' > '{}'",
                    results.display()
                );
                Invocation::new("/bin/sh").with_args(["-c".to_string(), script])
            }
            fn dialect(&self) -> Dialect {
                Dialect::robot()
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let artifacts = execute(RunRequest {
            backend: Backend::Suite {
                driver: Box::new(FakeDriver),
                suite: PathBuf::from("unused"),
            },
            output_dir: dir.path().to_path_buf(),
            run_id: Some(RunId::from("s1")),
        })
        .unwrap();

        assert!(dir.path().join("output-s1.xml").exists());
        let summary = artifacts.report.summary.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.passed, 1);
    }
}
