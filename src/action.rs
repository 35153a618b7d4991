//! The closed set of effectful steps and their shared lifecycle.
use anyhow::Result;

use crate::logging::Log;
use crate::resources::command::CommandResource;
use crate::resources::directory::DirectoryResource;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Applicable, ResourceChange};

/// One effectful step of a bootstrap routine.
#[derive(Debug)]
pub enum Action<'a> {
    /// Create a symbolic link.
    Symlink(SymlinkResource),
    /// Create a single directory level.
    MakeDir(DirectoryResource),
    /// Run a command line as a subprocess.
    RunCmd(CommandResource<'a>),
}

impl Action<'_> {
    fn resource(&self) -> &dyn Applicable {
        match self {
            Self::Symlink(r) => r,
            Self::MakeDir(r) => r,
            Self::RunCmd(r) => r,
        }
    }

    /// Human-readable description of what this action will do.
    #[must_use]
    pub fn description(&self) -> String {
        self.resource().description()
    }

    /// Run the action through its lifecycle.
    ///
    /// The intent line is logged first, in both normal and dry-run mode, so a
    /// dry run shows exactly the plan a real run would follow. The effect is
    /// only applied when `dry_run` is false. A target that already exists is
    /// reported as a warning and the run continues. Every outcome is counted
    /// in the log; an applied one also gets a `done:` debug line.
    ///
    /// # Errors
    ///
    /// Returns any fatal error from applying the effect.
    pub fn perform(&self, dry_run: bool, log: &dyn Log) -> Result<ResourceChange> {
        self.pre_exec(log);
        let change = if dry_run {
            ResourceChange::Planned
        } else {
            self.exec(log)?
        };
        self.post_exec(&change, log);
        Ok(change)
    }

    fn pre_exec(&self, log: &dyn Log) {
        log.info(&self.description());
    }

    fn exec(&self, log: &dyn Log) -> Result<ResourceChange> {
        let change = self.resource().apply()?;
        if let ResourceChange::Skipped { reason } = &change {
            log.warn(&format!("{}: {reason}", self.target_label()));
        }
        Ok(change)
    }

    fn post_exec(&self, change: &ResourceChange, log: &dyn Log) {
        if *change == ResourceChange::Applied {
            log.debug(&format!("done: {}", self.target_label()));
        }
        log.record_action(change);
    }

    fn target_label(&self) -> String {
        match self {
            Self::Symlink(r) => r.target.display().to_string(),
            Self::MakeDir(r) => r.target.display().to_string(),
            Self::RunCmd(r) => r.command.clone(),
        }
    }
}
