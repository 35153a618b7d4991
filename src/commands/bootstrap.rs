//! Command: run the selected routines against the home directory.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::environment::Environment;
use crate::error::BootstrapError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::routines::{self, Routine};

/// Run the bootstrap command.
///
/// Routine names are validated before anything runs. Routines then execute
/// in order and the first fatal error stops the run; the summary is printed
/// either way. A routine's own error is logged where it happens, so only a
/// [`BootstrapError::RoutinesFailed`] count is returned for it.
///
/// # Errors
///
/// Returns an error if a routine name is unknown, the root or home directory
/// cannot be determined, or a routine fails.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let selected = routines::select(&cli.routines)?;
    let root = resolve_root(cli.root.as_deref())?;
    let home = Environment::home_dir()?;

    let version = env!("CARGO_PKG_VERSION");
    log.debug(&format!("dotfiles-bootstrap {version}"));
    log.debug(&format!("root: {}", root.display()));
    log.debug(&format!("home: {}", home.display()));
    if cli.dry_run {
        log.dry_run("no changes will be made");
    }

    let shared: Arc<dyn Log> = log.clone();
    let mut env = Environment::new(cli.dry_run, shared, root, home, Arc::new(SystemExecutor));

    let result = run_routines(&selected, &mut env);
    log.print_summary();
    result.map_err(|e| routines_failed(&e, log.failure_count()).into())
}

/// Summarise a routine failure, keeping the exit code of a failed command.
fn routines_failed(err: &anyhow::Error, failed: usize) -> BootstrapError {
    let code = err
        .downcast_ref::<BootstrapError>()
        .map_or(1, BootstrapError::exit_code);
    BootstrapError::RoutinesFailed { failed, code }
}

/// Execute `selected` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first routine error.
pub fn run_routines(selected: &[Box<dyn Routine>], env: &mut Environment) -> Result<()> {
    for routine in selected {
        routines::execute(routine.as_ref(), env)?;
    }
    Ok(())
}

/// Resolve the dotfiles root: `--root`, then `DOTFILES_ROOT`, then the
/// current directory.
///
/// # Errors
///
/// Returns [`BootstrapError::RootNotFound`] if the chosen path does not exist
/// or is not a directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, BootstrapError> {
    let candidate = match explicit {
        Some(root) => root.to_path_buf(),
        None => match std::env::var_os("DOTFILES_ROOT") {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()
                .map_err(|e| BootstrapError::RootNotFound(format!("current directory: {e}")))?,
        },
    };

    let root = dunce::canonicalize(&candidate)
        .map_err(|e| BootstrapError::RootNotFound(format!("{}: {e}", candidate.display())))?;
    if !root.is_dir() {
        return Err(BootstrapError::RootNotFound(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    Ok(root)
}
