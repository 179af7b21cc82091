//! CLI command definitions and implementations.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use flowgen_core::GitBackend;

use crate::services::Flow;

pub mod completions;
pub mod preview;
pub mod run;
pub mod utils;

/// flowgen - synthetic git activity for branch-naming guideline demos.
///
/// Creates a branch named after the good (ticket id) or bad (prefixed
/// kebab-case) convention and makes a few commits that each rewrite one
/// random line of a text file.
#[derive(Parser, Debug)]
#[command(name = "flowgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only print errors and essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to .flowgen.toml at the repository root)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a ticket-id branch (EAT-1234) with conventional commits
    Good(RunArgs),

    /// Create a prefixed kebab-case branch (feature/nova-flux), violating the guidelines
    Bad(RunArgs),

    /// Print generated branch names and commit messages without touching git
    Preview {
        /// Which naming convention to preview (both when omitted)
        #[arg(long, value_enum)]
        pattern: Option<Flow>,

        /// How many names to generate per convention
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by the `good` and `bad` runs.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Make exactly this many commits instead of a random 1-3
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub commits: Option<u16>,

    /// Text file to modify, relative to the repository root
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Seed for reproducible names and edits
    #[arg(long)]
    pub seed: Option<u64>,

    /// Git implementation to use
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Show the planned branch and edits without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// `--backend` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Spawn the git executable
    Cli,
    /// Use libgit2 in-process
    Libgit2,
}

impl From<BackendArg> for GitBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cli => Self::Cli,
            BackendArg::Libgit2 => Self::Libgit2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_run_args_parse() {
        let cli = Cli::try_parse_from([
            "flowgen", "bad", "--commits", "2", "--seed", "7", "--backend", "libgit2",
        ])
        .unwrap();
        let Commands::Bad(args) = cli.command else {
            panic!("expected bad");
        };
        assert_eq!(args.commits, Some(2));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.backend, Some(BackendArg::Libgit2));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_zero_commits_rejected() {
        assert!(Cli::try_parse_from(["flowgen", "good", "--commits", "0"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        #[allow(clippy::unwrap_used)]
        let cli = Cli::try_parse_from(["flowgen", "good", "-q", "--config", "x.toml"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
