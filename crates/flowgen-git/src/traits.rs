//! Trait abstractions for git operations.
//!
//! This module defines the `GitOps` trait which abstracts the handful of git
//! operations a demo run needs, enabling dependency injection and testability.

use std::path::Path;

use crate::Result;

/// Trait for git repository operations.
///
/// Implemented by [`GitCli`](crate::GitCli), which shells out to `git`, and
/// by [`Repository`](crate::Repository), which uses libgit2 in-process.
/// All operations are synchronous and complete before returning.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    /// Get the working directory path.
    fn workdir(&self) -> Option<&Path>;

    /// Get the current branch name.
    ///
    /// Returns [`Error::DetachedHead`](crate::Error::DetachedHead) if HEAD
    /// is not on a branch.
    fn current_branch(&self) -> Result<String>;

    /// Check if a local branch exists.
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Create a branch at HEAD and switch to it.
    fn checkout_new_branch(&self, name: &str) -> Result<()>;

    /// Stage one file, given relative to the working directory.
    fn stage_path(&self, path: &Path) -> Result<()>;

    /// Commit the staged changes.
    fn commit(&self, message: &str) -> Result<()>;
}
