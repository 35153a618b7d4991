//! Domain-specific error types for the bootstrap engine.
//!
//! Typed failures are raised with [`BootstrapError`]; everything else is
//! carried as [`anyhow::Error`] with context attached at the call site.
//! `main` downcasts the final error to choose the process exit code.
//!
//! Only fatal conditions live here. A symlink or directory that already
//! exists is not an error: it is reported as
//! [`ResourceChange::Skipped`](crate::resources::ResourceChange::Skipped).

use thiserror::Error;

/// Fatal errors raised by the bootstrap engine.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A command run by an action exited unsuccessfully.
    #[error("command '{command}' failed (exit {})", display_code(*.code))]
    CommandFailed {
        /// The command line as written in the routine.
        command: String,
        /// Exit code of the process, `None` when killed by a signal.
        code: Option<i32>,
    },

    /// A command line could not be tokenised into a program and arguments.
    #[error("invalid command '{command}': {reason}")]
    InvalidCommand {
        /// The command line as written in the routine.
        command: String,
        /// Why tokenisation failed.
        reason: String,
    },

    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot determine home directory: {0} is not set")]
    HomeNotSet(&'static str),

    /// A routine name given on the command line is not registered.
    #[error("unknown routine '{name}' (available: {available})")]
    UnknownRoutine {
        /// The requested name.
        name: String,
        /// Comma-separated list of registered routine names.
        available: String,
    },

    /// One or more routines failed; each failure was already logged.
    #[error("{failed} {} failed", routines_noun(*.failed))]
    RoutinesFailed {
        /// Number of routines recorded as failed.
        failed: usize,
        /// Exit code carried over from the first failure.
        code: i32,
    },

    /// The dotfiles repository root could not be located.
    #[error("dotfiles root not found: {0}")]
    RootNotFound(String),
}

impl BootstrapError {
    /// Process exit code to use when this error terminates the program.
    ///
    /// A failed subprocess propagates its own exit status, also through
    /// [`RoutinesFailed`](Self::RoutinesFailed); everything else exits with
    /// `1`.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            Self::RoutinesFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

const fn routines_noun(n: usize) -> &'static str {
    if n == 1 { "routine" } else { "routines" }
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}
