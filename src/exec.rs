//! Subprocess execution behind an injectable [`Executor`] seam.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Outcome of a finished subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecStatus {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExecStatus {
    /// A successful exit with code `0`.
    pub const SUCCESS: Self = Self {
        success: true,
        code: Some(0),
    };

    /// An unsuccessful exit with the given code.
    #[must_use]
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

impl From<ExitStatus> for ExecStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process execution.
///
/// Production code uses [`SystemExecutor`]; tests substitute a recording
/// mock so routines can be exercised without spawning package managers.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` with `args` in `dir`, inheriting stdin, stdout, stderr
    /// and the environment of the current process.
    ///
    /// A non-zero exit is reported through [`ExecStatus`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be found or spawned.
    fn run_attached(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecStatus>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    /// Resolve `program` the way a shell would, relative paths against `dir`.
    fn resolve(program: &str, dir: &Path) -> Result<PathBuf> {
        which::which_in(program, std::env::var_os("PATH"), dir)
            .with_context(|| format!("program not found: {program}"))
    }
}

impl Executor for SystemExecutor {
    fn run_attached(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecStatus> {
        let resolved = Self::resolve(program, dir)?;
        let status = Command::new(&resolved)
            .args(args)
            .current_dir(dir)
            .status()
            .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
        Ok(ExecStatus::from(status))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
