//! In-memory [`Log`] backend.
use std::sync::Mutex;

use super::types::{Log, RunRecord, TaskEntry, TaskStatus};
use crate::resources::ResourceChange;

/// Severity of a captured [`LogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A stage header.
    Stage,
    /// An informational line.
    Info,
    /// A debug line.
    Debug,
    /// A warning.
    Warn,
    /// An error.
    Error,
    /// A dry-run notice.
    DryRun,
}

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity of the line.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
}

/// Collects log lines and routine results in memory instead of printing them.
///
/// Useful for embedding the engine and for asserting on the exact sequence
/// of messages an action run produced.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
    record: Mutex<RunRecord>,
}

/// Implement the display methods of [`Log`] by pushing a [`LogEntry`] of the
/// matching level.
macro_rules! capture_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.push(LogLevel::$level, msg);
            }
        )+
    };
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, msg: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(LogEntry {
                level,
                message: msg.to_string(),
            });
        }
    }

    /// All captured lines, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Messages captured at `level`, oldest first.
    #[must_use]
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Recorded routine results.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.record
            .lock()
            .map_or_else(|_| vec![], |g| g.tasks().to_vec())
    }
}

impl Log for MemoryLog {
    capture_log_methods!(
        stage => Stage,
        info => Info,
        debug => Debug,
        warn => Warn,
        error => Error,
        dry_run => DryRun,
    );

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

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn captures_in_order_with_levels() {
        let log = MemoryLog::new();
        log.stage("vim");
        log.info("mkdir ~/.vim");
        log.warn("exists");
        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, LogLevel::Stage);
        assert_eq!(entries[1].message, "mkdir ~/.vim");
        assert_eq!(entries[2].level, LogLevel::Warn);
    }

    #[test]
    fn messages_filters_by_level() {
        let log = MemoryLog::new();
        log.info("a");
        log.debug("hidden");
        log.info("b");
        assert_eq!(log.messages(LogLevel::Info), vec!["a", "b"]);
    }

    #[test]
    fn record_task_is_kept_separately() {
        let log = MemoryLog::new();
        log.record_task("vim", TaskStatus::DryRun, None);
        assert!(log.entries().is_empty());
        assert_eq!(log.task_entries()[0].status, TaskStatus::DryRun);
    }

    #[test]
    fn actions_are_tallied_per_routine() {
        let log = MemoryLog::new();
        log.record_action(&ResourceChange::Applied);
        log.record_action(&ResourceChange::Applied);
        log.record_task("vim", TaskStatus::Ok, None);
        log.record_action(&ResourceChange::Skipped {
            reason: "exists".to_string(),
        });
        log.record_task("subdirs", TaskStatus::Ok, None);

        let tasks = log.task_entries();
        assert_eq!(tasks[0].actions.to_string(), "2 applied");
        assert_eq!(tasks[1].actions.to_string(), "1 skipped");
    }
}
