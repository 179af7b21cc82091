//! Line-oriented text buffer backed by a single file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// An ordered sequence of lines.
///
/// Text is split on `'\n'` and joined back with `'\n'`, so a trailing
/// newline in the file shows up as an empty final line and survives a
/// load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// Create a buffer from individual lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a buffer from text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    /// Read the whole file at `path`.
    ///
    /// # Errors
    /// Returns error if the file can't be read or is not UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let buffer = Self::parse(&content);
        debug!(path = %path.display(), lines = buffer.len(), "loaded text buffer");
        Ok(buffer)
    }

    /// Overwrite the file at `path` with the full buffer.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())?;
        debug!(path = %path.display(), lines = self.len(), "saved text buffer");
        Ok(())
    }

    /// Serialize the buffer back to text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by 0-based index.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// All lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace one line, returning the previous content.
    pub(crate) fn replace(&mut self, index: usize, line: String) -> Option<String> {
        self.lines
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, line))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_trailing_newline_is_an_empty_final_line() {
        let buffer = TextBuffer::parse("# Title\n\nfirst\nsecond\n");
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.line(4), Some(""));
        assert_eq!(buffer.to_text(), "# Title\n\nfirst\nsecond\n");
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let buffer = TextBuffer::parse("");
        assert_eq!(buffer.len(), 1);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_load_and_save_overwrite_whole_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("text.md");
        fs::write(&path, "a\nb\nc").unwrap();

        let mut buffer = TextBuffer::load(&path).unwrap();
        assert_eq!(buffer.replace(1, "B".into()), Some("b".into()));
        buffer.save(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nB\nc");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        assert!(TextBuffer::load(temp.path().join("missing.md")).is_err());
    }

    #[test]
    fn test_replace_out_of_bounds() {
        let mut buffer = TextBuffer::from_lines(["only"]);
        assert_eq!(buffer.replace(3, "x".into()), None);
        assert_eq!(buffer.lines(), ["only"]);
    }
}
