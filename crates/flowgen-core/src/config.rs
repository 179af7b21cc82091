//! Configuration management for flowgen.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::{CountRange, GeneratorConfig};
use crate::mutator::DEFAULT_HEADER_LINES;
use crate::vocabulary::{DEFAULT_BRANCH_PREFIXES, DEFAULT_COMMIT_TYPES, DEFAULT_WORDS, Vocabulary};

/// Name of the config file looked up at the repository root.
pub const CONFIG_FILE: &str = ".flowgen.toml";

/// flowgen configuration loaded from `.flowgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Run settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Vocabularies and name shapes.
    #[serde(default)]
    pub naming: NamingConfig,

    /// Git backend selection.
    #[serde(default)]
    pub git: GitConfig,
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::ParseError {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::other(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Build a validated generator configuration.
    ///
    /// # Errors
    /// Returns error if a vocabulary is empty or a range is invalid.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let naming = &self.naming;
        GeneratorConfig {
            words: Vocabulary::new("words", naming.words.iter().cloned())?,
            branch_prefixes: Vocabulary::new("branch_prefixes", naming.branch_prefixes.iter().cloned())?,
            commit_types: Vocabulary::new("commit_types", naming.commit_types.iter().cloned())?,
            ticket_prefix: naming.ticket_prefix.clone(),
            ticket_range: CountRange::new(naming.ticket_min, naming.ticket_max)?,
            kebab_words: naming.kebab_words,
            commit_words: naming.commit_words,
            prose_words: naming.prose_words,
        }
        .validate()
    }

    /// Range of commits made per run.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if `min_commits > max_commits`.
    pub fn commit_range(&self) -> Result<CountRange> {
        CountRange::new(self.general.min_commits, self.general.max_commits)
    }
}

/// General run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Text file mutated by each commit, relative to the repository root.
    #[serde(default = "default_text_file")]
    pub text_file: PathBuf,

    /// Leading lines never mutated.
    #[serde(default = "default_header_lines")]
    pub header_lines: usize,

    /// Fewest commits per run.
    #[serde(default = "default_min_commits")]
    pub min_commits: usize,

    /// Most commits per run.
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            text_file: default_text_file(),
            header_lines: default_header_lines(),
            min_commits: default_min_commits(),
            max_commits: default_max_commits(),
        }
    }
}

fn default_text_file() -> PathBuf {
    PathBuf::from("text.md")
}

const fn default_header_lines() -> usize {
    DEFAULT_HEADER_LINES
}

const fn default_min_commits() -> usize {
    1
}

const fn default_max_commits() -> usize {
    3
}

/// Vocabularies and generated name shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_ticket_prefix")]
    pub ticket_prefix: String,

    #[serde(default = "default_ticket_min")]
    pub ticket_min: usize,

    #[serde(default = "default_ticket_max")]
    pub ticket_max: usize,

    #[serde(default = "default_words")]
    pub words: Vec<String>,

    #[serde(default = "default_branch_prefixes")]
    pub branch_prefixes: Vec<String>,

    #[serde(default = "default_commit_types")]
    pub commit_types: Vec<String>,

    #[serde(default = "default_kebab_words")]
    pub kebab_words: CountRange,

    #[serde(default = "default_commit_words")]
    pub commit_words: CountRange,

    #[serde(default = "default_prose_words")]
    pub prose_words: CountRange,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            ticket_prefix: default_ticket_prefix(),
            ticket_min: default_ticket_min(),
            ticket_max: default_ticket_max(),
            words: default_words(),
            branch_prefixes: default_branch_prefixes(),
            commit_types: default_commit_types(),
            kebab_words: default_kebab_words(),
            commit_words: default_commit_words(),
            prose_words: default_prose_words(),
        }
    }
}

fn default_ticket_prefix() -> String {
    "EAT".into()
}

const fn default_ticket_min() -> usize {
    1
}

const fn default_ticket_max() -> usize {
    9999
}

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn default_words() -> Vec<String> {
    to_owned_list(DEFAULT_WORDS)
}

fn default_branch_prefixes() -> Vec<String> {
    to_owned_list(DEFAULT_BRANCH_PREFIXES)
}

fn default_commit_types() -> Vec<String> {
    to_owned_list(DEFAULT_COMMIT_TYPES)
}

const fn default_kebab_words() -> CountRange {
    CountRange { min: 2, max: 4 }
}

const fn default_commit_words() -> CountRange {
    CountRange { min: 3, max: 6 }
}

const fn default_prose_words() -> CountRange {
    CountRange { min: 8, max: 15 }
}

/// Which implementation performs git operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Spawn the `git` executable.
    #[default]
    Cli,
    /// Use libgit2 in-process.
    Libgit2,
}

/// Git settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: GitBackend,
}
