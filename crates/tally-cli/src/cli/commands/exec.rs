use std::path::Path;

use super::super::args::ExecArgs;
use tally_core::dialect::Dialect;
use tally_core::run::{execute, Backend, RunRequest};
use tally_core::{Invocation, RunId};

pub(crate) fn run(args: ExecArgs) -> anyhow::Result<i32> {
    let dialect = resolve_dialect(&args.dialect)?;
    let invocation = Invocation::new(&args.bin).with_args(args.args.clone());

    let artifacts = execute(RunRequest {
        backend: Backend::Executable {
            invocation,
            results: args.results.clone(),
            dialect,
        },
        output_dir: args.output_dir.clone(),
        run_id: args.run_id.clone().map(RunId::from),
    })?;

    Ok(super::finish(&artifacts, args.exit_codes))
}

/// A dialect selector is either a builtin name or a descriptor file path.
fn resolve_dialect(selector: &str) -> anyhow::Result<Dialect> {
    if let Some(dialect) = Dialect::builtin(selector) {
        return Ok(dialect);
    }
    Dialect::from_file(Path::new(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_resolve_without_touching_the_filesystem() {
        assert_eq!(resolve_dialect("qtest").unwrap().name, "qtest");
        assert_eq!(resolve_dialect("robot").unwrap().name, "robot");
    }

    #[test]
    fn unknown_selector_falls_through_to_file_loading() {
        let err = resolve_dialect("no-such-dialect.yaml").unwrap_err();
        assert!(err.to_string().contains("no-such-dialect.yaml"));
    }

    #[test]
    fn descriptor_file_selector_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(
            &path,
            "name: custom\n\
             case_element: Case\n\
             name_attrs: [id]\n\
             status:\n\
             \x20 from: child_text\n\
             \x20 element: Outcome\n\
             pass_token: ok\n",
        )
        .unwrap();
        let dialect = resolve_dialect(path.to_str().unwrap()).unwrap();
        assert_eq!(dialect.name, "custom");
        assert_eq!(dialect.pass_token, "ok");
    }
}
