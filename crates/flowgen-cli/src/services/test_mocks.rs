//! Mock implementations for testing services.
//!
//! These mocks implement the traits from flowgen-git to enable unit testing
//! of service logic without real git repos.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use flowgen_git::{Error as GitError, GitOps, Result as GitResult};

/// A recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Checkout(String),
    Stage(PathBuf),
    Commit(String),
}

/// Mock implementation of `GitOps` for testing.
pub struct MockGitOps {
    pub workdir: Option<PathBuf>,
    pub current_branch: RefCell<String>,
    pub branches: RefCell<HashSet<String>>,
    pub detached: bool,
    pub calls: RefCell<Vec<GitCall>>,
    pub commits_allowed: Option<usize>,
    pub commits_made: Cell<usize>,
    pub snapshot_path: Option<PathBuf>,
    pub snapshots: RefCell<Vec<String>>,
}

impl Default for MockGitOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitOps {
    pub fn new() -> Self {
        Self {
            workdir: None,
            current_branch: RefCell::new("main".to_string()),
            branches: RefCell::new(HashSet::from(["main".to_string()])),
            detached: false,
            calls: RefCell::new(Vec::new()),
            commits_allowed: None,
            commits_made: Cell::new(0),
            snapshot_path: None,
            snapshots: RefCell::new(Vec::new()),
        }
    }

    pub fn with_workdir(mut self, path: &Path) -> Self {
        self.workdir = Some(path.to_path_buf());
        self
    }

    pub fn with_branch(self, name: &str) -> Self {
        self.branches.borrow_mut().insert(name.to_string());
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// Let `n` commits succeed, then fail every later one.
    pub fn fail_commit_after(mut self, n: usize) -> Self {
        self.commits_allowed = Some(n);
        self
    }

    /// Record the content of `path` whenever a commit is made.
    pub fn snapshot_on_commit(mut self, path: PathBuf) -> Self {
        self.snapshot_path = Some(path);
        self
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    pub fn snapshots(&self) -> Vec<String> {
        self.snapshots.borrow().clone()
    }
}

impl GitOps for MockGitOps {
    fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    fn current_branch(&self) -> GitResult<String> {
        if self.detached {
            return Err(GitError::DetachedHead);
        }
        Ok(self.current_branch.borrow().clone())
    }

    fn branch_exists(&self, name: &str) -> GitResult<bool> {
        Ok(self.branches.borrow().contains(name))
    }

    fn checkout_new_branch(&self, name: &str) -> GitResult<()> {
        self.calls
            .borrow_mut()
            .push(GitCall::Checkout(name.to_string()));
        if !self.branches.borrow_mut().insert(name.to_string()) {
            return Err(GitError::CommandFailed {
                command: format!("git checkout -b {name}"),
                code: Some(128),
                stderr: String::new(),
            });
        }
        *self.current_branch.borrow_mut() = name.to_string();
        Ok(())
    }

    fn stage_path(&self, path: &Path) -> GitResult<()> {
        self.calls
            .borrow_mut()
            .push(GitCall::Stage(path.to_path_buf()));
        Ok(())
    }

    fn commit(&self, message: &str) -> GitResult<()> {
        self.calls
            .borrow_mut()
            .push(GitCall::Commit(message.to_string()));

        let made = self.commits_made.get() + 1;
        self.commits_made.set(made);
        if self.commits_allowed.is_some_and(|allowed| made > allowed) {
            return Err(GitError::CommandFailed {
                command: format!("git commit -m \"{message}\""),
                code: Some(1),
                stderr: String::new(),
            });
        }

        if let Some(path) = &self.snapshot_path {
            let content = fs::read_to_string(path).map_err(|source| GitError::CommandSpawn {
                command: "snapshot".to_string(),
                source,
            })?;
            self.snapshots.borrow_mut().push(content);
        }
        Ok(())
    }
}
