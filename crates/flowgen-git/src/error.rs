//! Error types for flowgen-git.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// HEAD is detached (not on a branch).
    #[error("HEAD is detached - checkout a branch first")]
    DetachedHead,

    /// Branch not found.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// A path to stage lies outside the working directory.
    #[error("path is outside the working directory: {}", .0.display())]
    PathOutsideWorkdir(PathBuf),

    /// The command could not be started.
    #[error("failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully.
    #[error("`{command}` failed with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured stderr, empty when output was inherited.
        stderr: String,
    },

    /// Captured output was not UTF-8.
    #[error("`{0}` produced non-UTF-8 output")]
    InvalidUtf8(String),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"))
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
