//! [`GitOps`] implemented by spawning the `git` executable.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, CommandSpec};
use crate::traits::GitOps;

/// Git operations through a [`CommandRunner`].
///
/// Queries capture output; mutating commands inherit it, so git's own
/// progress and summary lines reach the terminal.
#[derive(Debug, Clone)]
pub struct GitCli<R: CommandRunner> {
    runner: R,
    workdir: PathBuf,
}

impl<R: CommandRunner> GitCli<R> {
    /// Run git commands in `workdir` through `runner`.
    pub fn new(runner: R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    /// The underlying runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    fn git<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new("git")
            .args(args)
            .current_dir(&self.workdir)
    }
}

impl<R: CommandRunner> GitOps for GitCli<R> {
    fn workdir(&self) -> Option<&Path> {
        Some(&self.workdir)
    }

    #[instrument(skip_all)]
    fn current_branch(&self) -> Result<String> {
        let name = self
            .runner
            .run_capturing(&self.git(["rev-parse", "--abbrev-ref", "HEAD"]))?;
        if name == "HEAD" {
            return Err(Error::DetachedHead);
        }
        debug!(branch = %name, "current branch");
        Ok(name)
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let listed = self.runner.run_capturing(&self.git(["branch", "--list", name]))?;
        Ok(!listed.is_empty())
    }

    #[instrument(skip(self))]
    fn checkout_new_branch(&self, name: &str) -> Result<()> {
        self.runner.run_inheriting(&self.git(["checkout", "-b", name]))
    }

    #[instrument(skip(self))]
    fn stage_path(&self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        self.runner.run_inheriting(&self.git(["add", "--", &*path]))
    }

    #[instrument(skip(self))]
    fn commit(&self, message: &str) -> Result<()> {
        self.runner
            .run_inheriting(&self.git(["commit", "--allow-empty", "-m", message]))
    }
}
