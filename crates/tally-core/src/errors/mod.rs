//! Error taxonomy for the run pipeline.
//!
//! Two deliberately separate types: `ParseError` enumerates the malformed
//! structured-input conditions that are allowed to trigger heuristic
//! fallback, `PersistError` is the one fatal class (a report that cannot be
//! written defeats the tool). Launch failures are not errors at all — they
//! are captured as data in `backend::RawCapture`.

use std::path::PathBuf;
use thiserror::Error;

/// A structured results file exists but could not be turned into a summary.
///
/// The resolver returns this instead of swallowing the condition; the
/// coordinator decides whether to fall back, and logs which variant occurred.
/// Anything not enumerated here must propagate, not silently degrade.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read results file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed results XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Filesystem persistence failed. Fatal: the run cannot produce its report.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {what} to {path}: {source}")]
    Write {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
