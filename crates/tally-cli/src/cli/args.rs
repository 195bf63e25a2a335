use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::exit_codes::ExitCodePolicy;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Run heterogeneous test backends and normalize their results into one uniform report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a compiled test executable
    Exec(ExecArgs),
    /// Run a test suite through a framework driver
    Suite(SuiteArgs),
    Version,
}

#[derive(Parser, Clone)]
pub struct ExecArgs {
    /// Path to the test executable
    #[arg(long)]
    pub bin: PathBuf,

    /// Directory for the log and report artifacts (created if absent)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Run identifier (generated when omitted)
    #[arg(long)]
    pub run_id: Option<String>,

    /// Path where the backend is expected to write structured XML results
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Results dialect: a builtin name (qtest|robot) or a descriptor file path
    #[arg(long, default_value = "qtest")]
    pub dialect: String,

    /// Exit code compatibility mode: v1 (legacy) or v2 (standard)
    #[arg(long, value_enum, default_value_t, env = "TALLY_EXIT_CODES")]
    pub exit_codes: ExitCodePolicy,

    /// Arguments passed through to the executable (use -- to separate)
    #[arg(last = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Parser, Clone)]
pub struct SuiteArgs {
    /// Path to the suite directory or file
    #[arg(long)]
    pub suite_dir: PathBuf,

    /// Directory for the log and report artifacts (created if absent)
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Run identifier (generated when omitted)
    #[arg(long)]
    pub run_id: Option<String>,

    /// Framework runner program
    #[arg(long, default_value = "robot")]
    pub runner: PathBuf,

    /// Exit code compatibility mode: v1 (legacy) or v2 (standard)
    #[arg(long, value_enum, default_value_t, env = "TALLY_EXIT_CODES")]
    pub exit_codes: ExitCodePolicy,
}
