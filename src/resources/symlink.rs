//! Symlink resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Applicable, ResourceChange, skip_if_exists};

/// A symlink at `target` pointing to `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkResource {
    /// Where the symlink will be created.
    pub target: PathBuf,
    /// What the symlink points to.
    pub source: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(target: PathBuf, source: PathBuf) -> Self {
        Self { target, source }
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!(
            "Creating symlink {} -> {}",
            self.target.display(),
            self.source.display()
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        // Anything already at the target, including a dangling link, is left alone.
        skip_if_exists(create_symlink(&self.source, &self.target)).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                self.target.display(),
                self.source.display()
            )
        })
    }
}

/// Create a symlink at `link` pointing to `source`.
#[cfg(unix)]
fn create_symlink(source: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

/// Create a symlink at `link` pointing to `source`.
///
/// Windows distinguishes file and directory links, so the kind follows the
/// source.
#[cfg(windows)]
fn create_symlink(source: &Path, link: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, link)
    } else {
        std::os::windows::fs::symlink_file(source, link)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("vimrc");
        std::fs::write(&source, "set nocompatible").unwrap();
        let target = dir.path().join(".vimrc");
        (dir, source, target)
    }

    #[test]
    fn description_names_both_ends() {
        let resource = SymlinkResource::new(
            PathBuf::from("/home/u/.vimrc"),
            PathBuf::from("/repo/vim/vimrc"),
        );
        assert_eq!(
            resource.description(),
            "Creating symlink /home/u/.vimrc -> /repo/vim/vimrc"
        );
    }

    #[test]
    fn creates_link_when_target_missing() {
        let (_dir, source, target) = fixture();
        let change = SymlinkResource::new(target.clone(), source.clone())
            .apply()
            .unwrap();
        assert_eq!(change, ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
    }

    #[test]
    fn existing_regular_file_is_left_untouched() {
        let (_dir, source, target) = fixture();
        std::fs::write(&target, "mine").unwrap();

        let change = SymlinkResource::new(target.clone(), source).apply().unwrap();

        assert!(matches!(change, ResourceChange::Skipped { .. }));
        let meta = std::fs::symlink_metadata(&target).unwrap();
        assert!(!meta.is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "mine");
    }

    #[test]
    fn existing_directory_is_skipped() {
        let (_dir, source, target) = fixture();
        std::fs::create_dir(&target).unwrap();

        let change = SymlinkResource::new(target.clone(), source).apply().unwrap();

        assert!(matches!(change, ResourceChange::Skipped { .. }));
        assert!(target.is_dir());
    }

    #[test]
    fn dangling_link_is_skipped() {
        let (dir, source, target) = fixture();
        let gone = dir.path().join("gone");
        std::os::unix::fs::symlink(&gone, &target).unwrap();

        let change = SymlinkResource::new(target.clone(), source).apply().unwrap();

        let ResourceChange::Skipped { reason } = change else {
            panic!("expected Skipped, got {change:?}");
        };
        assert!(reason.contains("exists"), "OS message expected, got {reason}");
        assert_eq!(std::fs::read_link(&target).unwrap(), gone);
    }

    #[test]
    fn missing_parent_is_fatal() {
        let (dir, source, _) = fixture();
        let target = dir.path().join("no-such-dir").join(".vimrc");

        let err = SymlinkResource::new(target, source).apply().unwrap_err();

        assert!(err.to_string().contains("creating symlink"));
    }
}
