use super::super::args::SuiteArgs;
use tally_core::run::{execute, Backend, RunRequest};
use tally_core::{RobotDriver, RunId};

pub(crate) fn run(args: SuiteArgs) -> anyhow::Result<i32> {
    let driver = RobotDriver {
        program: args.runner.clone(),
    };

    let artifacts = execute(RunRequest {
        backend: Backend::Suite {
            driver: Box::new(driver),
            suite: args.suite_dir.clone(),
        },
        output_dir: args.output_dir.clone(),
        run_id: args.run_id.clone().map(RunId::from),
    })?;

    Ok(super::finish(&artifacts, args.exit_codes))
}
