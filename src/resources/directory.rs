//! Directory resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Applicable, ResourceChange, skip_if_exists};

/// A single directory level at `target`.
///
/// Parents are not created; a missing parent is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResource {
    /// Directory to create.
    pub target: PathBuf,
}

impl DirectoryResource {
    /// Create a new directory resource.
    #[must_use]
    pub const fn new(target: PathBuf) -> Self {
        Self { target }
    }
}

impl Applicable for DirectoryResource {
    fn description(&self) -> String {
        format!("Creating directory {}", self.target.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        skip_if_exists(std::fs::create_dir(&self.target))
            .with_context(|| format!("creating directory {}", self.target.display()))
    }
}
