//! Branch name validation and newtype.
//!
//! Generated names are passed to `git checkout -b` as a process argument, so
//! [`BranchName`] enforces git's ref rules and rejects shell metacharacters
//! before anything reaches the command line.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Characters git refuses in ref names.
const GIT_FORBIDDEN: &[char] = &[' ', '~', '^', ':', '?', '*', '['];

/// Characters with special meaning to a shell.
const SHELL_META: &[char] = &[
    '$', ';', '|', '&', '>', '<', '`', '\\', '"', '\'', '(', ')', '{', '}', '!',
];

/// Two-character sequences git refuses in ref names.
const FORBIDDEN_SEQUENCES: &[&str] = &["..", "//", "@{", "/."];

/// A validated git branch name.
///
/// # Examples
///
/// ```
/// use flowgen_core::BranchName;
///
/// assert!(BranchName::new("EAT-1234").is_ok());
/// assert!(BranchName::new("feature/nova-cache").is_ok());
///
/// assert!(BranchName::new("feature/$(whoami)").is_err());
/// assert!(BranchName::new("fix..it").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBranchName`] if the name violates git's
    /// branch naming rules or contains shell metacharacters.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if let Some(reason) = violation(&name) {
            return Err(Error::InvalidBranchName { name, reason });
        }
        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the `BranchName` and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for BranchName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for BranchName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BranchName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for BranchName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BranchName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// Describe the first rule `name` breaks, if any.
fn violation(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("branch name cannot be empty".into());
    }
    if name == "@" {
        return Some("branch name cannot be '@'".into());
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Some("branch name cannot start or end with '.'".into());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Some("branch name cannot start or end with '/'".into());
    }
    #[allow(clippy::case_sensitive_file_extension_comparisons)]
    if name.ends_with(".lock") {
        return Some("branch name cannot end with '.lock'".into());
    }
    if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|seq| name.contains(**seq)) {
        return Some(format!("branch name cannot contain '{seq}'"));
    }

    name.chars().find_map(|c| {
        if c.is_ascii_control() {
            Some("branch name cannot contain control characters".to_string())
        } else if GIT_FORBIDDEN.contains(&c) {
            Some(format!("branch name cannot contain '{c}'"))
        } else if SHELL_META.contains(&c) {
            Some(format!("branch name cannot contain shell metacharacter '{c}'"))
        } else {
            None
        }
    })
}
