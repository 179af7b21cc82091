//! Synchronous external command execution.
//!
//! [`CommandRunner`] is the only place flowgen touches process facilities.
//! Higher layers build a [`CommandSpec`] and choose between inheriting the
//! child's output (so git's own messages reach the terminal) or capturing it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// A program invocation: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command from `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Renders the command as it would be typed, quoting arguments with spaces.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Capability to run external commands synchronously.
///
/// Implementations must block until the child exits and map a non-zero
/// exit status to [`Error::CommandFailed`].
#[allow(clippy::missing_errors_doc)]
pub trait CommandRunner {
    /// Run the command with stdout and stderr inherited from this process.
    fn run_inheriting(&self, command: &CommandSpec) -> Result<()>;

    /// Run the command and return its trimmed stdout.
    fn run_capturing(&self, command: &CommandSpec) -> Result<String>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run_inheriting(&self, command: &CommandSpec) -> Result<()> {
        (**self).run_inheriting(command)
    }

    fn run_capturing(&self, command: &CommandSpec) -> Result<String> {
        (**self).run_capturing(command)
    }
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %command))]
    fn run_inheriting(&self, command: &CommandSpec) -> Result<()> {
        debug!("running with inherited output");
        let status = command
            .to_command()
            .stdin(Stdio::null())
            .status()
            .map_err(|source| Error::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        if !status.success() {
            debug!(code = ?status.code(), "command failed");
            return Err(Error::CommandFailed {
                command: command.to_string(),
                code: status.code(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    #[instrument(skip_all, fields(command = %command))]
    fn run_capturing(&self, command: &CommandSpec) -> Result<String> {
        debug!("running with captured output");
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            debug!(code = ?output.status.code(), "command failed");
            return Err(Error::CommandFailed {
                command: command.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| Error::InvalidUtf8(command.to_string()))?;
        Ok(stdout.trim().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::new("git")
            .arg("commit")
            .arg("-m")
            .arg("feat: nova \"flux\" cache");
        assert_eq!(
            spec.to_string(),
            "git commit -m \"feat: nova \\\"flux\\\" cache\""
        );
    }

    #[test]
    fn test_builder_accessors() {
        let spec = CommandSpec::new("git")
            .args(["checkout", "-b", "EAT-1"])
            .current_dir("/tmp");
        assert_eq!(spec.program(), "git");
        assert_eq!(spec.arguments(), ["checkout", "-b", "EAT-1"]);
        assert_eq!(spec.cwd(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_capture_returns_trimmed_stdout() {
        let spec = CommandSpec::new("git").arg("--version");
        let out = SystemRunner.run_capturing(&spec).unwrap();
        assert!(out.starts_with("git version"));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_nonzero_exit_is_an_error() {
        let temp = TempDir::new().unwrap();
        let spec = CommandSpec::new("git")
            .args(["rev-parse", "--abbrev-ref", "HEAD"])
            .current_dir(temp.path());

        let err = SystemRunner.run_capturing(&spec).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { code: Some(_), .. }));

        let err = SystemRunner.run_inheriting(&spec).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { ref stderr, .. } if stderr.is_empty()));
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let spec = CommandSpec::new("flowgen-no-such-program");
        let err = SystemRunner.run_inheriting(&spec).unwrap_err();
        assert!(matches!(err, Error::CommandSpawn { .. }));
    }
}
