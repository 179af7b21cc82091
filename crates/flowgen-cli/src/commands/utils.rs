use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flowgen_core::{CONFIG_FILE, Config, NameGenerator, StdRandom};
use flowgen_git::{CommandRunner, CommandSpec, GitOps, Repository, discover_workdir};

use crate::output;

/// Helper to open the repository and its working directory.
pub fn open_repo() -> Result<(Repository, PathBuf)> {
    let repo = Repository::open_current().context("Not inside a git repository")?;
    let workdir = repo
        .workdir()
        .context("Cannot run in bare repository")?
        .to_path_buf();
    Ok((repo, workdir))
}

/// Load config from `explicit`, or from the repository root, or defaults.
///
/// An explicit path must exist.
pub fn load_config(explicit: Option<&Path>, workdir: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Config::load(path).with_context(|| format!("Invalid config {}", path.display()));
    }

    let root = match workdir {
        Some(dir) => Some(dir.to_path_buf()),
        None => discover_workdir(".").ok(),
    };
    match root {
        Some(dir) => Config::load(dir.join(CONFIG_FILE)).context("Invalid config"),
        None => Ok(Config::default()),
    }
}

/// Build a generator from config, seeded when a seed is given.
pub fn build_generator(config: &Config, seed: Option<u64>) -> Result<NameGenerator<StdRandom>> {
    let rng = seed.map_or_else(StdRandom::from_entropy, StdRandom::seeded);
    let generator_config = config
        .generator_config()
        .context("Invalid naming configuration")?;
    Ok(NameGenerator::with_config(rng, generator_config)?)
}

/// [`CommandRunner`] decorator that echoes inherited commands as `> cmd`.
///
/// Captured queries are not echoed.
pub struct EchoRunner<R: CommandRunner> {
    inner: R,
}

impl<R: CommandRunner> EchoRunner<R> {
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: CommandRunner> CommandRunner for EchoRunner<R> {
    fn run_inheriting(&self, command: &CommandSpec) -> flowgen_git::Result<()> {
        output::command(&command.to_string());
        self.inner.run_inheriting(command)
    }

    fn run_capturing(&self, command: &CommandSpec) -> flowgen_git::Result<String> {
        self.inner.run_capturing(command)
    }
}
