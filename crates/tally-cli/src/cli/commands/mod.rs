use super::args::{Cli, Command};
use crate::exit_codes::{self, ExitCodePolicy, SUCCESS};
use tally_core::run::RunArtifacts;

pub(crate) mod exec;
pub(crate) mod suite;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Exec(args) => exec::run(args),
        Command::Suite(args) => suite::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}

/// Common tail of every run command: human summary on stderr, the report
/// path as the single stdout line automation depends on, then the exit code.
pub(crate) fn finish(artifacts: &RunArtifacts, policy: ExitCodePolicy) -> i32 {
    tally_core::report::console::print_summary(&artifacts.report);
    println!("{}", artifacts.report_path.display());
    exit_codes::exit_code_for(&artifacts.report, policy)
}
