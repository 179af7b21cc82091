//! Error types for flowgen-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in flowgen-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A random range was requested with `min > max`.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: usize, max: usize },

    /// A vocabulary was constructed without any words.
    #[error("vocabulary '{0}' is empty")]
    EmptyVocabulary(String),

    /// A vocabulary word that would not survive joining and splitting.
    #[error(
        "vocabulary '{vocabulary}' has invalid word '{word}': \
         words must be non-empty without spaces or hyphens"
    )]
    InvalidWord { vocabulary: String, word: String },

    /// A word count of zero was requested.
    #[error("word count must be at least 1 (got {0})")]
    InvalidWordCount(usize),

    /// The text buffer has no line that may be mutated.
    #[error(
        "buffer has {len} lines but at least {required} are needed \
         ({header_lines} header lines, one candidate, one final line)"
    )]
    BufferTooShort {
        /// Number of lines in the buffer.
        len: usize,
        /// Minimum number of lines required.
        required: usize,
        /// Size of the excluded header region.
        header_lines: usize,
    },

    /// Invalid branch name.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName {
        /// The invalid name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// Config or text file parsing error.
    #[error("failed to parse {file}: {message}")]
    ParseError { file: PathBuf, message: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
