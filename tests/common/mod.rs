// Shared helpers for integration tests.
//
// Each test gets its own dotfiles repository, home directory and cache
// directory so runs of the `bootstrap` binary never touch the real home.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// An isolated repository, home and cache directory backed by
/// [`tempfile::TempDir`]s.
pub struct IntegrationTestContext {
    /// Temporary dotfiles repository.
    pub repo: tempfile::TempDir,
    /// Temporary home directory.
    pub home: tempfile::TempDir,
    /// Temporary `XDG_CACHE_HOME`.
    pub cache: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context whose repository contains `vim/vimrc`.
    pub fn new() -> Self {
        let ctx = Self {
            repo: tempfile::tempdir().expect("create repo dir"),
            home: tempfile::tempdir().expect("create home dir"),
            cache: tempfile::tempdir().expect("create cache dir"),
        };
        ctx.write_repo_file("vim/vimrc", "set nocompatible\n");
        ctx
    }

    /// Write `contents` to `relative` inside the repository, creating parents.
    pub fn write_repo_file(&self, relative: &str, contents: &str) {
        let path = self.repo.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, contents).expect("write repo file");
    }

    /// Canonical repository path, as the binary reports it.
    pub fn repo_path(&self) -> PathBuf {
        std::fs::canonicalize(self.repo.path()).expect("canonicalize repo")
    }

    /// Home directory path.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Names of the entries in the home directory, sorted.
    pub fn home_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.home.path())
            .expect("read home dir")
            .map(|e| {
                e.expect("read home entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Path of the run log written by the binary.
    pub fn log_file(&self) -> PathBuf {
        self.cache.path().join("dotfiles").join("bootstrap.log")
    }

    /// Run the `bootstrap` binary against this context's repository.
    pub fn run(&self, args: &[&str]) -> Output {
        let root = self.repo.path().to_str().expect("utf-8 temp path");
        let mut full = vec!["--root", root];
        full.extend_from_slice(args);
        self.run_without_root(&full)
    }

    /// Run the `bootstrap` binary with exactly `args`, home and cache
    /// isolated.
    pub fn run_without_root(&self, args: &[&str]) -> Output {
        self.run_with_home(self.home.path(), args)
    }

    /// Run the `bootstrap` binary with exactly `args` and `home` as the home
    /// directory.
    pub fn run_with_home(&self, home: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_bootstrap"))
            .args(args)
            .env("HOME", home)
            .env("USERPROFILE", home)
            .env("XDG_CACHE_HOME", self.cache.path())
            .env_remove("DOTFILES_ROOT")
            .output()
            .expect("run bootstrap binary")
    }
}

/// Captured stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
