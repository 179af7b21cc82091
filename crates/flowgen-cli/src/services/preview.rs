//! Preview service: generate names without touching git.

use anyhow::Result;
use flowgen_core::{BranchName, NameGenerator, RandomSource};
use serde::Serialize;

use super::demo::Flow;

/// A generated branch name with a sample commit message.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    pub flow: Flow,
    pub branch: BranchName,
    pub commit_message: String,
}

/// Service for previewing generated names.
pub struct PreviewService<R: RandomSource> {
    generator: NameGenerator<R>,
}

impl<R: RandomSource> PreviewService<R> {
    #[must_use]
    pub const fn new(generator: NameGenerator<R>) -> Self {
        Self { generator }
    }

    /// Generate `count` entries for each flow in `flows`.
    pub fn generate(&mut self, flows: &[Flow], count: usize) -> Result<Vec<PreviewEntry>> {
        let mut entries = Vec::with_capacity(flows.len() * count);
        for &flow in flows {
            for _ in 0..count {
                let branch = BranchName::new(self.generator.generate(flow.pattern())?)?;
                let commit_message = self.generator.commit_message()?;
                entries.push(PreviewEntry {
                    flow,
                    branch,
                    commit_message,
                });
            }
        }
        Ok(entries)
    }
}
