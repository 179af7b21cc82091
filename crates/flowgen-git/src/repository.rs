//! Repository wrapper providing in-process git operations via libgit2.

use std::path::{Path, PathBuf};

use git2::{BranchType, ErrorCode};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::traits::GitOps;

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path or any parent.
    ///
    /// # Errors
    /// Returns [`Error::NotARepository`] if no repository is found.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository,
            _ => Error::Git2(e),
        })?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Check if HEAD is detached.
    ///
    /// # Errors
    /// Returns error if HEAD cannot be read.
    pub fn head_detached(&self) -> Result<bool> {
        Ok(self.inner.head_detached()?)
    }

    /// Check whether HEAD points at a commit yet.
    #[must_use]
    pub fn has_commits(&self) -> bool {
        self.inner.head().is_ok_and(|head| head.target().is_some())
    }

    /// Convert `path` to a path relative to the working directory.
    fn relative_to_workdir<'p>(&self, path: &'p Path) -> Result<&'p Path> {
        if path.is_relative() {
            return Ok(path);
        }
        let workdir = self
            .inner
            .workdir()
            .ok_or_else(|| Error::PathOutsideWorkdir(path.to_path_buf()))?;
        path.strip_prefix(workdir)
            .map_err(|_| Error::PathOutsideWorkdir(path.to_path_buf()))
    }

    /// Get a reference to the underlying git2 repository.
    #[must_use]
    pub fn inner(&self) -> &git2::Repository {
        &self.inner
    }
}

impl GitOps for Repository {
    fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(Error::DetachedHead)
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.inner.find_branch(name, BranchType::Local).is_ok())
    }

    #[instrument(skip(self))]
    fn checkout_new_branch(&self, name: &str) -> Result<()> {
        let head_commit = self.inner.head()?.peel_to_commit()?;
        let branch = self.inner.branch(name, &head_commit, false)?;
        let refname = branch
            .get()
            .name()
            .ok_or_else(|| Error::BranchNotFound(name.into()))?
            .to_string();

        self.inner.checkout_tree(head_commit.as_object(), None)?;
        self.inner.set_head(&refname)?;
        debug!(branch = name, "created and checked out branch");
        Ok(())
    }

    #[instrument(skip(self))]
    fn stage_path(&self, path: &Path) -> Result<()> {
        let relative = self.relative_to_workdir(path)?;
        let mut index = self.inner.index()?;
        index.add_path(relative)?;
        index.write()?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn commit(&self, message: &str) -> Result<()> {
        let signature = self.inner.signature()?;
        let mut index = self.inner.index()?;
        let tree = self.inner.find_tree(index.write_tree()?)?;

        let parent = match self.inner.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!(%oid, "created commit");
        Ok(())
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}

/// Resolve the working directory of the repository containing `path`.
///
/// # Errors
/// Returns [`Error::NotARepository`] for paths outside a repository or
/// inside a bare one.
pub fn discover_workdir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let repo = Repository::open(path)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or(Error::NotARepository)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_test_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();

        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();

            fs::write(temp.path().join("text.md"), "# Title\n\none\ntwo\n").unwrap();
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("text.md")).unwrap();
            index.write().unwrap();

            let sig = repo.signature().unwrap();
            let tree_id = index.write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap();
        }

        let wrapped = Repository { inner: repo };
        (temp, wrapped)
    }

    fn head_message(repo: &Repository) -> String {
        let commit = repo.inner().head().unwrap().peel_to_commit().unwrap();
        commit.message().unwrap().to_string()
    }

    #[test]
    fn test_current_branch() {
        let (_temp, repo) = init_test_repo();
        let branch = repo.current_branch().unwrap();
        assert!(branch == "main" || branch == "master");
        assert!(!repo.head_detached().unwrap());
        assert!(repo.has_commits());
    }

    #[test]
    fn test_checkout_new_branch() {
        let (_temp, repo) = init_test_repo();

        repo.checkout_new_branch("EAT-42").unwrap();
        assert!(repo.branch_exists("EAT-42").unwrap());
        assert_eq!(repo.current_branch().unwrap(), "EAT-42");

        assert!(repo.checkout_new_branch("EAT-42").is_err());
    }

    #[test]
    fn test_stage_and_commit() {
        let (temp, repo) = init_test_repo();
        repo.checkout_new_branch("feature/nova-flux").unwrap();

        fs::write(temp.path().join("text.md"), "# Title\n\nalpha beta\ntwo\n").unwrap();
        repo.stage_path(Path::new("text.md")).unwrap();
        repo.commit("feat: alpha beta gamma").unwrap();

        assert_eq!(head_message(&repo), "feat: alpha beta gamma");
        let statuses = repo.inner().statuses(None).unwrap();
        assert!(statuses.is_empty());
    }

    #[test]
    fn test_stage_absolute_path_inside_workdir() {
        let (_temp, repo) = init_test_repo();
        let absolute = repo.workdir().unwrap().join("text.md");
        fs::write(&absolute, "changed\n").unwrap();

        repo.stage_path(&absolute).unwrap();
        repo.commit("chore: cache queue sync").unwrap();
        assert_eq!(head_message(&repo), "chore: cache queue sync");
    }

    #[test]
    fn test_stage_path_outside_workdir() {
        let (_temp, repo) = init_test_repo();
        let err = repo.stage_path(Path::new("/definitely/elsewhere.md")).unwrap_err();
        assert!(matches!(err, Error::PathOutsideWorkdir(_)));
    }

    #[test]
    fn test_detached_head() {
        let (_temp, repo) = init_test_repo();
        let oid = repo.inner().head().unwrap().target().unwrap();
        repo.inner().set_head_detached(oid).unwrap();

        assert!(repo.head_detached().unwrap());
        assert!(matches!(repo.current_branch(), Err(Error::DetachedHead)));
    }

    #[test]
    fn test_open_outside_repository() {
        let temp = TempDir::new().unwrap();
        let err = Repository::open(temp.path()).unwrap_err();
        assert!(matches!(err, Error::NotARepository));
    }

    #[test]
    fn test_discover_workdir_from_subdirectory() {
        let (temp, _repo) = init_test_repo();
        let nested = temp.path().join("docs/deep");
        fs::create_dir_all(&nested).unwrap();

        let workdir = discover_workdir(&nested).unwrap();
        assert_eq!(
            workdir.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }
}
