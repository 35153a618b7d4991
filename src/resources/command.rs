//! Shell command resource.
use anyhow::Result;
use std::path::PathBuf;

use super::{Applicable, ResourceChange};
use crate::error::BootstrapError;
use crate::exec::Executor;

/// A command line run once in a fixed working directory.
#[derive(Debug)]
pub struct CommandResource<'a> {
    /// The command line, tokenised with shell word rules before running.
    pub command: String,
    /// Working directory for the process.
    pub cwd: PathBuf,
    executor: &'a dyn Executor,
}

impl<'a> CommandResource<'a> {
    /// Create a new command resource.
    #[must_use]
    pub fn new(command: impl Into<String>, cwd: PathBuf, executor: &'a dyn Executor) -> Self {
        Self {
            command: command.into(),
            cwd,
            executor,
        }
    }
}

/// Split a command line into program and arguments using shell word rules.
///
/// # Errors
///
/// Returns [`BootstrapError::InvalidCommand`] for unbalanced quotes or an
/// empty command line.
pub fn tokenize(command: &str) -> Result<(String, Vec<String>), BootstrapError> {
    let invalid = |reason: String| BootstrapError::InvalidCommand {
        command: command.to_string(),
        reason,
    };
    let mut words = shell_words::split(command).map_err(|e| invalid(e.to_string()))?;
    if words.is_empty() {
        return Err(invalid("empty command".to_string()));
    }
    let program = words.remove(0);
    Ok((program, words))
}

impl Applicable for CommandResource<'_> {
    fn description(&self) -> String {
        format!("Running `{}` in {}", self.command, self.cwd.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let (program, args) = tokenize(&self.command)?;
        let status = self.executor.run_attached(&self.cwd, &program, &args)?;
        if !status.success {
            return Err(BootstrapError::CommandFailed {
                command: self.command.clone(),
                code: status.code,
            }
            .into());
        }
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn tokenize_respects_quotes() {
        let (program, args) = tokenize("sh -c 'echo \"hi there\"'").unwrap();
        assert_eq!(program, "sh");
        assert_eq!(args, vec!["-c", "echo \"hi there\""]);
    }

    #[test]
    fn tokenize_rejects_unbalanced_quotes() {
        let err = tokenize("echo 'oops").unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidCommand { .. }));
    }

    #[test]
    fn tokenize_rejects_empty_command() {
        let err = tokenize("   ").unwrap_err();
        assert!(err.to_string().contains("empty command"));
    }

    #[test]
    fn apply_runs_in_working_directory() {
        let executor = MockExecutor::ok();
        let resource = CommandResource::new(
            "sudo apt-get install -y vim",
            PathBuf::from("/repo/vim"),
            &executor,
        );

        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].dir, PathBuf::from("/repo/vim"));
        assert_eq!(calls[0].program, "sudo");
        assert_eq!(calls[0].args, vec!["apt-get", "install", "-y", "vim"]);
    }

    #[test]
    fn apply_fails_on_non_zero_exit() {
        let executor = MockExecutor::failing(100);
        let resource = CommandResource::new("brew install vim", PathBuf::from("/repo"), &executor);

        let err = resource.apply().unwrap_err();

        let typed = err
            .downcast_ref::<BootstrapError>()
            .expect("typed command failure");
        assert!(matches!(
            typed,
            BootstrapError::CommandFailed { code: Some(100), .. }
        ));
    }

    #[test]
    fn invalid_command_never_reaches_executor() {
        let executor = MockExecutor::ok();
        let resource = CommandResource::new("echo 'oops", PathBuf::from("/repo"), &executor);

        assert!(resource.apply().is_err());
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn description_names_command_and_directory() {
        let executor = MockExecutor::ok();
        let resource = CommandResource::new("brew install vim", PathBuf::from("/repo"), &executor);
        assert_eq!(resource.description(), "Running `brew install vim` in /repo");
    }
}
