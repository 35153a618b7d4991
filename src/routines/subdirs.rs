//! Link every entry of every tool directory into the home directory.
//!
//! A tool directory is any non-hidden directory at the repository root that
//! is not itself a Rust crate. Each entry `name` inside it becomes
//! `~/.name`.
use std::path::Path;

use anyhow::{Context as _, Result};

use super::Routine;
use crate::environment::Environment;

/// Generic routine for repositories laid out one directory per tool.
#[derive(Debug, Clone, Copy)]
pub struct Subdirs;

impl Routine for Subdirs {
    fn name(&self) -> &'static str {
        "subdirs"
    }

    fn description(&self) -> &'static str {
        "link every entry of every tool directory as ~/.<entry>"
    }

    fn is_default(&self) -> bool {
        false
    }

    fn run(&self, env: &mut Environment) -> Result<()> {
        for dir in sorted_names(env.repo_dir(), |path, name| {
            path.is_dir() && !name.starts_with('.') && !path.join("Cargo.toml").exists()
        })? {
            env.log().stage(&format!("{dir} dotfiles"));
            env.pushd(&dir);
            for entry in sorted_names(env.cwd(), |_, _| true)? {
                env.symlink_in_userdir(&entry)?;
            }
            env.popd();
        }
        Ok(())
    }
}

/// Names of the entries of `dir` accepted by `keep`, sorted.
///
/// Names that are not valid UTF-8 are skipped.
fn sorted_names(dir: &Path, keep: impl Fn(&Path, &str) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading directory {}", dir.display()))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if keep(&entry.path(), &name) {
            names.push(name);
        }
    }
    names.sort_unstable();
    Ok(names)
}
