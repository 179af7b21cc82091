//! Single-line replacement inside a [`TextBuffer`].
//!
//! The target line is drawn uniformly from the lines between a fixed-size
//! header region and the final line. Mutation is pure: the input buffer is
//! never touched and a failed call has no side effects.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use crate::buffer::TextBuffer;
use crate::error::{Error, Result};
use crate::generator::NameGenerator;
use crate::random::RandomSource;

/// Default number of leading lines excluded from mutation.
pub const DEFAULT_HEADER_LINES: usize = 2;

/// The result of replacing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The buffer after the replacement.
    pub buffer: TextBuffer,
    /// Description of what changed.
    pub change: LineChange,
}

/// Which line changed and how, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    /// 0-based index of the replaced line.
    pub index: usize,
    /// Content before the replacement.
    pub old_line: String,
    /// Content after the replacement.
    pub new_line: String,
}

impl LineChange {
    /// 1-based line number, as editors show it.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.index + 1
    }

    /// Whether the generated line happens to equal the original.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.old_line == self.new_line
    }
}

/// Compute the inclusive range of mutable indexes for a buffer.
///
/// # Errors
/// Returns [`Error::BufferTooShort`] if `len < header_lines + 3`.
pub fn mutation_targets(len: usize, header_lines: usize) -> Result<RangeInclusive<usize>> {
    let required = header_lines + 3;
    if len < required {
        return Err(Error::BufferTooShort {
            len,
            required,
            header_lines,
        });
    }
    Ok(header_lines..=len - 2)
}

/// Replaces one non-header, non-final line with generated prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMutator {
    header_lines: usize,
}

impl Default for LineMutator {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_LINES)
    }
}

impl LineMutator {
    /// Create a mutator that skips `header_lines` leading lines.
    #[must_use]
    pub const fn new(header_lines: usize) -> Self {
        Self { header_lines }
    }

    /// Size of the excluded header region.
    #[must_use]
    pub const fn header_lines(&self) -> usize {
        self.header_lines
    }

    /// Replace one line of `buffer` with a fresh prose line.
    ///
    /// The target index is drawn before the replacement text.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if there is no mutable line.
    pub fn mutate<R: RandomSource>(
        &self,
        buffer: &TextBuffer,
        generator: &mut NameGenerator<R>,
    ) -> Result<Mutation> {
        let targets = mutation_targets(buffer.len(), self.header_lines)?;
        let index = generator.random_int(*targets.start(), *targets.end())?;
        let new_line = generator.prose_line()?;

        let mut next = buffer.clone();
        let old_line = next
            .replace(index, new_line.clone())
            .ok_or(Error::BufferTooShort {
                len: buffer.len(),
                required: self.header_lines + 3,
                header_lines: self.header_lines,
            })?;

        debug!(index, old = %old_line, new = %new_line, "mutated line");

        Ok(Mutation {
            buffer: next,
            change: LineChange {
                index,
                old_line,
                new_line,
            },
        })
    }
}

/// Replace one line of `buffer`, skipping `header_lines` leading lines.
///
/// # Errors
/// See [`LineMutator::mutate`].
pub fn mutate<R: RandomSource>(
    buffer: &TextBuffer,
    header_lines: usize,
    generator: &mut NameGenerator<R>,
) -> Result<Mutation> {
    LineMutator::new(header_lines).mutate(buffer, generator)
}
