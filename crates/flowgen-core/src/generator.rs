//! Pseudo-random branch names, commit messages and prose lines.
//!
//! The *shape* of every generated string is fixed; only its content is
//! random. Repetition across calls is allowed: two calls may return the same
//! word or even the same full string.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::branch_name::BranchName;
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::vocabulary::Vocabulary;

/// An inclusive `min..=max` range of counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    /// Create a range, validating `min <= max`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if `min > max`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Check whether `value` falls inside the range.
    #[must_use]
    pub const fn contains(&self, value: usize) -> bool {
        self.min <= value && value <= self.max
    }

    /// Validate a range of word counts: ordered and starting at one or more.
    fn validate_word_count(self) -> Result<Self> {
        let range = Self::new(self.min, self.max)?;
        if range.min == 0 {
            return Err(Error::InvalidWordCount(0));
        }
        Ok(range)
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// How generated words are joined and decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePattern {
    /// `prefix/word-word`, the discouraged branch naming.
    PrefixedKebab,
    /// `PREFIX-1234`, a ticket-tracker id.
    TicketId,
    /// `type: some words`.
    ConventionalCommit,
    /// Space separated words.
    FreeText,
}

/// Vocabularies and shape parameters for a [`NameGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub words: Vocabulary,
    pub branch_prefixes: Vocabulary,
    pub commit_types: Vocabulary,
    pub ticket_prefix: String,
    pub ticket_range: CountRange,
    pub kebab_words: CountRange,
    pub commit_words: CountRange,
    pub prose_words: CountRange,
}

impl GeneratorConfig {
    /// Check every range. Vocabularies are non-empty by construction.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] or [`Error::InvalidWordCount`].
    pub fn validate(self) -> Result<Self> {
        CountRange::new(self.ticket_range.min, self.ticket_range.max)?;
        self.kebab_words.validate_word_count()?;
        self.commit_words.validate_word_count()?;
        self.prose_words.validate_word_count()?;
        Ok(self)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            words: Vocabulary::default_words(),
            branch_prefixes: Vocabulary::default_branch_prefixes(),
            commit_types: Vocabulary::default_commit_types(),
            ticket_prefix: "EAT".to_string(),
            ticket_range: CountRange { min: 1, max: 9999 },
            kebab_words: CountRange { min: 2, max: 4 },
            commit_words: CountRange { min: 3, max: 6 },
            prose_words: CountRange { min: 8, max: 15 },
        }
    }
}

/// Generates branch names, commit messages and prose lines.
#[derive(Debug, Clone)]
pub struct NameGenerator<R: RandomSource> {
    rng: R,
    config: GeneratorConfig,
}

impl<R: RandomSource> NameGenerator<R> {
    /// Create a generator with the built-in vocabularies.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: GeneratorConfig::default(),
        }
    }

    /// Create a generator with custom vocabularies and ranges.
    ///
    /// # Errors
    /// Returns an error if any configured range is invalid.
    pub fn with_config(rng: R, config: GeneratorConfig) -> Result<Self> {
        Ok(Self {
            rng,
            config: config.validate()?,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Uniform integer in `min..=max`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if `min > max`.
    pub fn random_int(&mut self, min: usize, max: usize) -> Result<usize> {
        draw_int(&mut self.rng, min, max)
    }

    /// Draw `count` words from `vocabulary` with replacement and join them.
    ///
    /// # Errors
    /// Returns [`Error::InvalidWordCount`] if `count` is zero.
    pub fn random_words(
        &mut self,
        count: usize,
        vocabulary: &Vocabulary,
        joiner: &str,
    ) -> Result<String> {
        draw_words(&mut self.rng, count, vocabulary, joiner)
    }

    /// A discouraged branch name such as `feature/nova-cache-flux`.
    ///
    /// # Errors
    /// Returns an error if a configured prefix or word is not a valid ref
    /// component.
    pub fn broken_branch_name(&mut self) -> Result<BranchName> {
        let prefix = draw_one(&mut self.rng, &self.config.branch_prefixes)?;
        let count = draw_in(&mut self.rng, self.config.kebab_words)?;
        let description = draw_words(&mut self.rng, count, &self.config.words, "-")?;
        BranchName::new(format!("{prefix}/{description}"))
    }

    /// A ticket-id branch name such as `EAT-1234`.
    ///
    /// # Errors
    /// Returns an error if the configured ticket prefix is not a valid ref.
    pub fn compliant_branch_name(&mut self) -> Result<BranchName> {
        let number = draw_in(&mut self.rng, self.config.ticket_range)?;
        BranchName::new(format!("{}-{number}", self.config.ticket_prefix))
    }

    /// A commit message in `type: description` form.
    ///
    /// # Errors
    /// Returns an error only for invalid configuration.
    pub fn commit_message(&mut self) -> Result<String> {
        let kind = draw_one(&mut self.rng, &self.config.commit_types)?;
        let count = draw_in(&mut self.rng, self.config.commit_words)?;
        let description = draw_words(&mut self.rng, count, &self.config.words, " ")?;
        Ok(format!("{kind}: {description}"))
    }

    /// A line of placeholder prose.
    ///
    /// # Errors
    /// Returns an error only for invalid configuration.
    pub fn prose_line(&mut self) -> Result<String> {
        let count = draw_in(&mut self.rng, self.config.prose_words)?;
        draw_words(&mut self.rng, count, &self.config.words, " ")
    }

    /// Generate a string of the given shape.
    ///
    /// # Errors
    /// See the individual generators.
    pub fn generate(&mut self, pattern: NamePattern) -> Result<String> {
        let value = match pattern {
            NamePattern::PrefixedKebab => self.broken_branch_name()?.into_inner(),
            NamePattern::TicketId => self.compliant_branch_name()?.into_inner(),
            NamePattern::ConventionalCommit => self.commit_message()?,
            NamePattern::FreeText => self.prose_line()?,
        };
        trace!(?pattern, %value, "generated");
        Ok(value)
    }
}

fn draw_int<R: RandomSource>(rng: &mut R, min: usize, max: usize) -> Result<usize> {
    if min > max {
        return Err(Error::InvalidRange { min, max });
    }
    if min == max {
        return Ok(min);
    }
    Ok(rng.next_int(min, max))
}

fn draw_in<R: RandomSource>(rng: &mut R, range: CountRange) -> Result<usize> {
    draw_int(rng, range.min, range.max)
}

fn draw_one<'v, R: RandomSource>(rng: &mut R, vocabulary: &'v Vocabulary) -> Result<&'v str> {
    let index = draw_int(rng, 0, vocabulary.len() - 1)?;
    Ok(vocabulary[index].as_str())
}

fn draw_words<R: RandomSource>(
    rng: &mut R,
    count: usize,
    vocabulary: &Vocabulary,
    joiner: &str,
) -> Result<String> {
    if count == 0 {
        return Err(Error::InvalidWordCount(count));
    }
    let words = (0..count)
        .map(|_| draw_one(rng, vocabulary))
        .collect::<Result<Vec<_>>>()?;
    Ok(words.join(joiner))
}
