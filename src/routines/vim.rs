//! Vim: install the editor, link `vimrc`, create swap/backup/undo directories.
use anyhow::Result;

use super::Routine;
use crate::environment::Environment;

/// Directories under the home directory that `vimrc` points swap, backup and
/// undo files at. Parents come before children.
const VIM_DIRS: [&str; 4] = [".vim", ".vim/backup", ".vim/tmp", ".vim/undodir"];

/// Bootstrap routine for vim.
#[derive(Debug, Clone, Copy)]
pub struct Vim;

impl Routine for Vim {
    fn name(&self) -> &'static str {
        "vim"
    }

    fn description(&self) -> &'static str {
        "install vim, link ~/.vimrc, create ~/.vim directories"
    }

    fn run(&self, env: &mut Environment) -> Result<()> {
        env.pushd("vim");

        match env.package_manager() {
            Some(pm) => {
                env.run_cmd(&pm.install_command("vim"))?;
            }
            None => env
                .log()
                .warn("no supported package manager found, skipping vim install"),
        }

        env.symlink_in_userdir("vimrc")?;
        for dir in VIM_DIRS {
            env.mkdir(dir)?;
        }

        env.popd();
        Ok(())
    }
}
