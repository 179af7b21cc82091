//! Fixed word lists used for random text generation.

use std::fmt;
use std::ops::Deref;

use crate::error::{Error, Result};

/// Placeholder words for branch descriptions, commit messages and prose.
pub const DEFAULT_WORDS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "sigma", "omega", "phoenix", "dragon", "quantum", "nebula", "cosmic", "stellar",
    "aurora", "vertex", "matrix", "cipher", "nexus", "prism", "echo", "pulse", "flux", "nova",
    "horizon", "zenith", "apex", "core", "node", "link", "spark", "wave", "beam", "logic", "data",
    "sync", "async", "stream", "buffer", "cache", "queue",
];

/// Conventional-but-discouraged branch prefixes (`feature/`, `fix/`, ...).
pub const DEFAULT_BRANCH_PREFIXES: &[&str] = &[
    "feature", "fix", "hotfix", "bugfix", "update", "add", "remove", "change", "modify",
    "refactor", "improve", "new", "wip", "test",
];

/// Commit types accepted in the `type: description` commit format.
pub const DEFAULT_COMMIT_TYPES: &[&str] = &["feat", "fix", "chore", "docs"];

/// An ordered, non-empty list of candidate words.
///
/// # Examples
///
/// ```
/// use flowgen_core::Vocabulary;
///
/// let vocab = Vocabulary::new("greek", ["alpha", "beta"]).unwrap();
/// assert_eq!(vocab.len(), 2);
/// assert!(vocab.contains("beta"));
///
/// assert!(Vocabulary::new("empty", Vec::<String>::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    words: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary from a list of words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyVocabulary`] if `words` is empty, or
    /// [`Error::InvalidWord`] if a word is empty or contains whitespace or
    /// `-`, the characters generated names are joined with.
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(Error::EmptyVocabulary(name));
        }
        if let Some(word) = words.iter().find(|w| !is_plain_word(w)) {
            return Err(Error::InvalidWord {
                vocabulary: name,
                word: word.clone(),
            });
        }
        Ok(Self { name, words })
    }

    /// The built-in word list.
    #[must_use]
    pub fn default_words() -> Self {
        Self::from_static("words", DEFAULT_WORDS)
    }

    /// The built-in discouraged branch prefixes.
    #[must_use]
    pub fn default_branch_prefixes() -> Self {
        Self::from_static("branch_prefixes", DEFAULT_BRANCH_PREFIXES)
    }

    /// The built-in commit types.
    #[must_use]
    pub fn default_commit_types() -> Self {
        Self::from_static("commit_types", DEFAULT_COMMIT_TYPES)
    }

    fn from_static(name: &str, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            words: words.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Name used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether `word` is part of this vocabulary.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// The words as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

fn is_plain_word(word: &str) -> bool {
    !word.is_empty() && !word.contains(|c: char| c.is_whitespace() || c == '-')
}

impl Deref for Vocabulary {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} words)", self.name, self.words.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vocabulary_rejected() {
        let err = Vocabulary::new("prefixes", Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyVocabulary(ref name) if name == "prefixes"));
    }

    #[test]
    fn test_defaults_match_word_lists() {
        assert_eq!(Vocabulary::default_words().len(), 46);
        assert_eq!(Vocabulary::default_branch_prefixes().len(), 14);
        assert_eq!(
            Vocabulary::default_commit_types().as_slice(),
            ["feat", "fix", "chore", "docs"]
        );
    }

    #[test]
    fn test_words_with_joiners_rejected() {
        for bad in ["", "a-b", "two words", "tab\there"] {
            let err = Vocabulary::new("words", ["ok", bad]).unwrap_err();
            let Error::InvalidWord { vocabulary, word } = err else {
                panic!("expected InvalidWord for {bad:?}");
            };
            assert_eq!(vocabulary, "words");
            assert_eq!(word, bad);
        }
    }

    #[test]
    fn test_defaults_are_plain_words() {
        for list in [DEFAULT_WORDS, DEFAULT_BRANCH_PREFIXES, DEFAULT_COMMIT_TYPES] {
            assert!(list.iter().all(|w| is_plain_word(w)));
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let vocab = Vocabulary::new("v", ["c", "a", "b"]).unwrap();
        assert_eq!(vocab[0], "c");
        assert_eq!(vocab[2], "b");
        assert_eq!(vocab.to_string(), "v (3 words)");
    }
}
