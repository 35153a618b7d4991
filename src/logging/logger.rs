//! Production [`Log`] backend: `tracing` events plus the end-of-run summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{
    DRY_RUN, STAGE, SUMMARY_FAILED, SUMMARY_OK, SUMMARY_PLANNED, log_file_path,
};
use super::types::{Log, RunRecord, TaskEntry, TaskStatus};
use crate::resources::ResourceChange;

/// Emits every message as a `tracing` event and keeps the per-routine action
/// tallies for [`print_summary`](Self::print_summary).
///
/// Rendering is left to the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    record: Mutex<RunRecord>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger whose summary points at the run log for `command`.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger reporting an explicit run log path (or none).
    #[must_use]
    pub fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            record: Mutex::new(RunRecord::default()),
            log_file,
        }
    }

    /// Routine results recorded so far.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.record
            .lock()
            .map_or_else(|_| vec![], |g| g.tasks().to_vec())
    }

    /// Number of routines recorded as failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.task_entries()
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count()
    }

    /// Print one line per routine with its action counts (or its error),
    /// then the totals and the run log location.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");

        let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for task in &tasks {
            let detail = task
                .message
                .clone()
                .unwrap_or_else(|| task.actions.to_string());
            let line = format!("{} {:<width$}  {detail}", task.status.icon(), task.name);
            match task.status {
                TaskStatus::Ok => tracing::info!(target: SUMMARY_OK, "{line}"),
                TaskStatus::DryRun => tracing::info!(target: SUMMARY_PLANNED, "{line}"),
                TaskStatus::Failed => tracing::info!(target: SUMMARY_FAILED, "{line}"),
            }
        }

        let run = tasks.len();
        let noun = if run == 1 { "routine" } else { "routines" };
        self.info(&format!("{run} {noun} run, {} failed", self.failure_count()));

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN, "{msg}");
    }

    fn record_action(&self, change: &ResourceChange) {
        if let Ok(mut guard) = self.record.lock() {
            guard.record_action(change);
        }
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.record.lock() {
            guard.finish_task(name, status, message);
        }
    }
}
