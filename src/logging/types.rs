//! Routine results, per-routine action tallies, and the [`Log`] trait.
use std::fmt;

use crate::resources::ResourceChange;

/// How many actions of one routine ended in each outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActionTally {
    /// Effects carried out.
    pub applied: usize,
    /// Effects announced by a dry run.
    pub planned: usize,
    /// Targets that already existed.
    pub skipped: usize,
}

impl ActionTally {
    /// Count one finished action.
    pub const fn record(&mut self, change: &ResourceChange) {
        match change {
            ResourceChange::Applied => self.applied += 1,
            ResourceChange::Planned => self.planned += 1,
            ResourceChange::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Number of actions counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.applied + self.planned + self.skipped
    }
}

impl fmt::Display for ActionTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total() == 0 {
            return f.write_str("no actions");
        }
        let parts: Vec<String> = [
            (self.applied, "applied"),
            (self.planned, "planned"),
            (self.skipped, "skipped"),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label}"))
        .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Routine execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Routine name.
    pub name: String,
    /// Final status of the routine.
    pub status: TaskStatus,
    /// Actions the routine performed before it finished or failed.
    pub actions: ActionTally,
    /// Error description for a failed routine.
    pub message: Option<String>,
}

/// Status of a completed routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Routine completed and its actions were applied.
    Ok,
    /// Routine ran in dry-run mode; no changes were applied.
    DryRun,
    /// Routine aborted with a fatal error.
    Failed,
}

impl TaskStatus {
    /// Summary marker.
    #[must_use]
    pub const fn icon(self) -> char {
        match self {
            Self::Ok => '✓',
            Self::DryRun => '~',
            Self::Failed => '✗',
        }
    }
}

/// Action outcomes and routine results collected during one run.
///
/// Actions are tallied against the routine in progress; finishing a routine
/// moves the tally into its [`TaskEntry`] and starts a fresh one.
#[derive(Debug, Default)]
pub(super) struct RunRecord {
    current: ActionTally,
    tasks: Vec<TaskEntry>,
}

impl RunRecord {
    pub(super) const fn record_action(&mut self, change: &ResourceChange) {
        self.current.record(change);
    }

    pub(super) fn finish_task(&mut self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.tasks.push(TaskEntry {
            name: name.to_string(),
            status,
            actions: std::mem::take(&mut self.current),
            message: message.map(String::from),
        });
    }

    pub(super) fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) emits through `tracing`;
/// [`MemoryLog`](super::memory::MemoryLog) keeps entries in memory. Actions
/// and routines only see this trait.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run notice.
    fn dry_run(&self, msg: &str);
    /// Count the outcome of one performed action.
    fn record_action(&self, change: &ResourceChange);
    /// Record a routine result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
