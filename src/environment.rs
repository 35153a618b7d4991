//! The context routines run in: fixed repository and home paths, a
//! directory stack, and builders that turn each step into an
//! [`Action`](crate::action::Action).
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::action::Action;
use crate::error::BootstrapError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::PackageManager;
use crate::resources::ResourceChange;
use crate::resources::command::CommandResource;
use crate::resources::directory::DirectoryResource;
use crate::resources::symlink::SymlinkResource;

/// Shared context for bootstrap routines.
///
/// Holds the fixed repository and home paths, the dry-run flag, and a stack
/// of current directories used to resolve relative sources. The stack always
/// starts with the repository root and never becomes empty.
pub struct Environment {
    dry_run: bool,
    log: Arc<dyn Log>,
    repo_dir: PathBuf,
    user_dir: PathBuf,
    dirs: Vec<PathBuf>,
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("dry_run", &self.dry_run)
            .field("log", &"<dyn Log>")
            .field("repo_dir", &self.repo_dir)
            .field("user_dir", &self.user_dir)
            .field("dirs", &self.dirs)
            .field("executor", &self.executor)
            .finish()
    }
}

impl Environment {
    /// Creates a new environment rooted at `repo_dir`.
    #[must_use]
    pub fn new(
        dry_run: bool,
        log: Arc<dyn Log>,
        repo_dir: PathBuf,
        user_dir: PathBuf,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            dry_run,
            log,
            dirs: vec![repo_dir.clone()],
            repo_dir,
            user_dir,
            executor,
        }
    }

    /// The current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::HomeNotSet`] if `HOME` (or `USERPROFILE` on
    /// Windows) is not set.
    pub fn home_dir() -> Result<PathBuf, BootstrapError> {
        let home = if cfg!(target_os = "windows") {
            std::env::var("USERPROFILE")
                .or_else(|_| std::env::var("HOME"))
                .map_err(|_| BootstrapError::HomeNotSet("USERPROFILE"))?
        } else {
            std::env::var("HOME").map_err(|_| BootstrapError::HomeNotSet("HOME"))?
        };
        Ok(PathBuf::from(home))
    }

    /// Whether actions are announced without being applied.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Root directory of the dotfiles repository.
    #[must_use]
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Logger shared with every action.
    #[must_use]
    pub fn log(&self) -> &dyn Log {
        self.log.as_ref()
    }

    /// Top of the directory stack.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        self.dirs.last().unwrap_or(&self.repo_dir)
    }

    /// `path` resolved against the home directory.
    #[must_use]
    pub fn relative_to_user(&self, path: impl AsRef<Path>) -> PathBuf {
        self.user_dir.join(path)
    }

    /// `path` resolved against the current directory.
    #[must_use]
    pub fn relative_to_cwd(&self, path: impl AsRef<Path>) -> PathBuf {
        self.cwd().join(path)
    }

    /// Enter `dir`, relative to the current directory.
    pub fn pushd(&mut self, dir: impl AsRef<Path>) {
        let next = self.relative_to_cwd(dir);
        self.log.debug(&format!("pushd {}", next.display()));
        self.dirs.push(next);
    }

    /// Leave the directory entered by the matching [`pushd`](Self::pushd).
    ///
    /// # Panics
    ///
    /// Panics when there is no matching `pushd`; the repository root can
    /// never be popped.
    pub fn popd(&mut self) {
        assert!(
            self.dirs.len() > 1,
            "popd without matching pushd (cwd: {})",
            self.cwd().display()
        );
        self.dirs.truncate(self.dirs.len() - 1);
        self.log.debug(&format!("popd {}", self.cwd().display()));
    }

    /// Create a symlink at `target` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created for any reason other
    /// than the target already existing.
    pub fn symlink(
        &self,
        target: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
    ) -> Result<ResourceChange> {
        self.perform(&Action::Symlink(SymlinkResource::new(
            target.into(),
            source.into(),
        )))
    }

    /// Link `~/.{name}` to `name` in the current directory.
    ///
    /// # Errors
    ///
    /// See [`symlink`](Self::symlink).
    pub fn symlink_in_userdir(&self, name: &str) -> Result<ResourceChange> {
        let target = self.relative_to_user(format!(".{name}"));
        let source = self.relative_to_cwd(name);
        self.symlink(target, source)
    }

    /// Create one directory level at `target`, relative to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created for any reason
    /// other than it already existing (e.g. a missing parent).
    pub fn mkdir(&self, target: impl AsRef<Path>) -> Result<ResourceChange> {
        self.perform(&Action::MakeDir(DirectoryResource::new(
            self.relative_to_user(target),
        )))
    }

    /// Run `cmd` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is invalid, the program cannot
    /// be started, or it exits unsuccessfully.
    pub fn run_cmd(&self, cmd: &str) -> Result<ResourceChange> {
        self.perform(&Action::RunCmd(CommandResource::new(
            cmd,
            self.cwd().to_path_buf(),
            self.executor.as_ref(),
        )))
    }

    /// The package manager available on this host, if any.
    #[must_use]
    pub fn package_manager(&self) -> Option<PackageManager> {
        PackageManager::detect(self.executor.as_ref())
    }

    fn perform(&self, action: &Action<'_>) -> Result<ResourceChange> {
        action.perform(self.dry_run, self.log.as_ref())
    }
}
