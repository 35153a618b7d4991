//! Named bootstrap routines, one per tool.
pub mod subdirs;
pub mod vim;

use anyhow::Result;

use crate::environment::Environment;
use crate::error::BootstrapError;
use crate::logging::TaskStatus;

/// A named procedure that brings one tool's configuration to its end state.
///
/// Routines are written as straight-line sequences of [`Environment`]
/// operations. A fatal error aborts the routine at that step.
pub trait Routine: Send + Sync {
    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// One-line summary shown by `--list`.
    fn description(&self) -> &'static str;

    /// Whether the routine runs when no routine is named on the command line.
    fn is_default(&self) -> bool {
        true
    }

    /// Execute the routine.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error raised by an action (failed command,
    /// missing parent directory, permission denied, ...).
    fn run(&self, env: &mut Environment) -> Result<()>;
}

/// Every registered routine, in execution order.
#[must_use]
pub fn all_routines() -> Vec<Box<dyn Routine>> {
    vec![Box::new(vim::Vim), Box::new(subdirs::Subdirs)]
}

/// Routines that run when none is named on the command line.
#[must_use]
pub fn default_routines() -> Vec<Box<dyn Routine>> {
    all_routines().into_iter().filter(|r| r.is_default()).collect()
}

/// Look up a registered routine by exact name.
#[must_use]
pub fn find(name: &str) -> Option<Box<dyn Routine>> {
    all_routines().into_iter().find(|r| r.name() == name)
}

/// Resolve command-line names to routines.
///
/// An empty list selects the [default routines](default_routines). The
/// routines run in the order given.
///
/// # Errors
///
/// Returns [`BootstrapError::UnknownRoutine`] for the first name that is not
/// registered.
pub fn select(names: &[String]) -> Result<Vec<Box<dyn Routine>>, BootstrapError> {
    if names.is_empty() {
        return Ok(default_routines());
    }

    names
        .iter()
        .map(|name| {
            find(name).ok_or_else(|| BootstrapError::UnknownRoutine {
                name: name.clone(),
                available: all_routines()
                    .iter()
                    .map(|r| r.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        })
        .collect()
}

/// Execute a routine, recording the result in the logger.
///
/// # Errors
///
/// Propagates the routine's error after recording it as failed.
pub fn execute(routine: &dyn Routine, env: &mut Environment) -> Result<()> {
    env.log().stage(routine.name());

    match routine.run(env) {
        Ok(()) => {
            let status = if env.dry_run() {
                TaskStatus::DryRun
            } else {
                TaskStatus::Ok
            };
            env.log().record_task(routine.name(), status, None);
            Ok(())
        }
        Err(e) => {
            env.log().error(&format!("{}: {e:#}", routine.name()));
            env.log()
                .record_task(routine.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::environment::test_helpers::test_env;
    use crate::logging::LogLevel;
    use crate::resources::test_helpers::MockExecutor;

    struct Failing;

    impl Routine for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn run(&self, _env: &mut Environment) -> Result<()> {
            anyhow::bail!("boom")
        }
    }

    #[test]
    fn default_selection_is_vim_only() {
        let selected = select(&[]).unwrap();
        let names: Vec<_> = selected.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["vim"]);
    }

    #[test]
    fn explicit_selection_keeps_order() {
        let selected = select(&["subdirs".to_string(), "vim".to_string()]).unwrap();
        let names: Vec<_> = selected.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["subdirs", "vim"]);
    }

    #[test]
    fn unknown_routine_is_rejected() {
        let err = select(&["vim".to_string(), "zsh".to_string()])
            .err()
            .expect("zsh is not registered");
        assert!(matches!(err, BootstrapError::UnknownRoutine { ref name, .. } if name == "zsh"));
        assert!(err.to_string().contains("vim, subdirs"));
    }

    #[test]
    fn find_is_exact() {
        assert_eq!(find("subdirs").map(|r| r.name()), Some("subdirs"));
        assert!(find("Vim").is_none());
        assert!(find("vi").is_none());
    }

    #[test]
    fn routine_names_are_unique() {
        let routines = all_routines();
        let mut names: Vec<_> = routines.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), routines.len());
    }

    #[test]
    fn execute_records_failure_and_propagates() {
        let mut t = test_env(false, MockExecutor::ok());

        let err = execute(&Failing, &mut t.env).unwrap_err();

        assert_eq!(err.to_string(), "boom");
        let tasks = t.log.task_entries();
        assert_eq!(tasks[0].status, TaskStatus::Failed);
        assert_eq!(tasks[0].message.as_deref(), Some("boom"));
        assert_eq!(t.log.messages(LogLevel::Error), vec!["failing: boom"]);
    }

    #[test]
    fn execute_records_dry_run_status() {
        let mut t = test_env(true, MockExecutor::ok());

        execute(&vim::Vim, &mut t.env).unwrap();

        assert_eq!(t.log.messages(LogLevel::Stage)[0], "vim");
        assert_eq!(t.log.task_entries()[0].status, TaskStatus::DryRun);
    }
}
