//! Demo service: create a branch and a few synthetic commits on it.
//!
//! This module drives the name generator and line mutator against a git
//! backend, separated from CLI presentation concerns. The command layer calls
//! the steps one at a time so it can narrate between them.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use flowgen_core::{
    BranchName, CountRange, LineChange, LineMutator, NameGenerator, NamePattern, RandomSource,
    TextBuffer,
};
use flowgen_git::GitOps;
use serde::Serialize;
use tracing::{debug, info};

/// Which branch-naming convention a run demonstrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Ticket-id branch names (`EAT-1234`).
    Good,
    /// Prefixed kebab-case branch names (`feature/nova-flux`).
    Bad,
}

impl Flow {
    /// The branch name shape this flow generates.
    #[must_use]
    pub const fn pattern(self) -> NamePattern {
        match self {
            Self::Good => NamePattern::TicketId,
            Self::Bad => NamePattern::PrefixedKebab,
        }
    }
}

/// Settings for a demo run.
#[derive(Debug, Clone)]
pub struct DemoSettings {
    /// Text file mutated by each commit, relative to the working directory.
    pub text_file: PathBuf,
    /// Leading lines never mutated.
    pub header_lines: usize,
    /// How many commits to make.
    pub commits: CountRange,
}

/// What a run will do before anything is changed.
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    pub flow: Flow,
    pub branch: BranchName,
    pub original_branch: String,
    pub commit_count: usize,
}

/// One mutation and the message it will be committed with.
#[derive(Debug, Clone)]
pub struct PendingCommit {
    /// 1-based position within the run.
    pub number: usize,
    /// Buffer state to write before committing.
    pub buffer: TextBuffer,
    pub change: LineChange,
    pub message: String,
}

/// Service for demo runs with trait-based dependencies.
pub struct DemoService<'a, G: GitOps, R: RandomSource> {
    repo: &'a G,
    generator: NameGenerator<R>,
    mutator: LineMutator,
    settings: DemoSettings,
}

impl<'a, G: GitOps, R: RandomSource> DemoService<'a, G, R> {
    /// Create a new demo service.
    pub fn new(repo: &'a G, generator: NameGenerator<R>, settings: DemoSettings) -> Self {
        Self {
            repo,
            generator,
            mutator: LineMutator::new(settings.header_lines),
            settings,
        }
    }

    /// Absolute path of the text file.
    pub fn text_path(&self) -> Result<PathBuf> {
        let workdir = self
            .repo
            .workdir()
            .context("Cannot run in bare repository")?;
        Ok(workdir.join(&self.settings.text_file))
    }

    /// Generate a branch name, check the repository and draw a commit count.
    ///
    /// Nothing is changed on disk or in git.
    pub fn plan(&mut self, flow: Flow) -> Result<RunPlan> {
        let branch = match flow {
            Flow::Good => self.generator.compliant_branch_name()?,
            Flow::Bad => self.generator.broken_branch_name()?,
        };

        let original_branch = self
            .repo
            .current_branch()
            .context("Cannot determine the current branch")?;

        if self.repo.branch_exists(&branch)? {
            bail!("Branch '{branch}' already exists");
        }

        let commits = self.settings.commits;
        let commit_count = self.generator.random_int(commits.min, commits.max)?;
        debug!(%branch, %original_branch, commit_count, "planned run");

        Ok(RunPlan {
            flow,
            branch,
            original_branch,
            commit_count,
        })
    }

    /// Create the planned branch and switch to it.
    pub fn create_branch(&self, plan: &RunPlan) -> Result<()> {
        self.repo
            .checkout_new_branch(&plan.branch)
            .with_context(|| format!("Failed to create branch '{}'", plan.branch))?;
        info!(branch = %plan.branch, "branch created");
        Ok(())
    }

    /// Read the text file in full.
    pub fn load_text(&self) -> Result<TextBuffer> {
        let path = self.text_path()?;
        TextBuffer::load(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Fail unless `buffer` has at least one line the mutator may rewrite.
    pub fn check_text(&self, buffer: &TextBuffer) -> Result<()> {
        flowgen_core::mutation_targets(buffer.len(), self.mutator.header_lines())
            .with_context(|| format!("Cannot modify {}", self.settings.text_file.display()))?;
        Ok(())
    }

    /// Mutate one line of `buffer` and generate a commit message.
    ///
    /// Pure with respect to the file and the repository.
    pub fn prepare_commit(&mut self, number: usize, buffer: &TextBuffer) -> Result<PendingCommit> {
        let mutation = self
            .mutator
            .mutate(buffer, &mut self.generator)
            .with_context(|| format!("Cannot modify {}", self.settings.text_file.display()))?;
        let message = self.generator.commit_message()?;

        Ok(PendingCommit {
            number,
            buffer: mutation.buffer,
            change: mutation.change,
            message,
        })
    }

    /// Write the mutated buffer, stage the file and commit it.
    pub fn apply_commit(&self, pending: &PendingCommit) -> Result<()> {
        let path = self.text_path()?;
        pending
            .buffer
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        self.repo.stage_path(&self.settings.text_file)?;
        self.repo.commit(&pending.message)?;
        info!(number = pending.number, message = %pending.message, "committed");
        Ok(())
    }

    /// Run every step without narration. Returns the plan and each commit.
    #[allow(dead_code)]
    pub fn run(&mut self, flow: Flow) -> Result<(RunPlan, Vec<PendingCommit>)> {
        let plan = self.plan(flow)?;
        self.create_branch(&plan)?;

        let mut commits = Vec::with_capacity(plan.commit_count);
        for number in 1..=plan.commit_count {
            let buffer = self.load_text()?;
            let pending = self.prepare_commit(number, &buffer)?;
            self.apply_commit(&pending)?;
            commits.push(pending);
        }
        Ok((plan, commits))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use flowgen_core::{ScriptedRandom, StdRandom};
    use tempfile::TempDir;

    use super::*;
    use crate::services::test_mocks::{GitCall, MockGitOps};

    const TEXT: &str = "# Notes\n\nfirst\nsecond\nthird\n";

    fn settings(commits: usize) -> DemoSettings {
        DemoSettings {
            text_file: PathBuf::from("text.md"),
            header_lines: 2,
            commits: CountRange {
                min: commits,
                max: commits,
            },
        }
    }

    fn workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("text.md"), TEXT).unwrap();
        temp
    }

    #[test]
    fn test_good_flow_uses_ticket_ids() {
        let temp = workspace();
        let repo = MockGitOps::new().with_workdir(temp.path());
        let generator = NameGenerator::new(ScriptedRandom::new([4321]));
        let mut service = DemoService::new(&repo, generator, settings(2));

        let plan = service.plan(Flow::Good).unwrap();
        assert_eq!(plan.branch, "EAT-4321");
        assert_eq!(plan.original_branch, "main");
        assert_eq!(plan.commit_count, 2);
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_bad_flow_uses_prefixed_names() {
        let temp = workspace();
        let repo = MockGitOps::new().with_workdir(temp.path());
        let generator = NameGenerator::new(StdRandom::seeded(9));
        let mut service = DemoService::new(&repo, generator, settings(1));

        let plan = service.plan(Flow::Bad).unwrap();
        assert!(plan.branch.contains('/'));
        assert!(!plan.branch.starts_with("EAT-"));
    }

    #[test]
    fn test_run_commits_in_order() {
        let temp = workspace();
        let repo = MockGitOps::new().with_workdir(temp.path());
        let generator = NameGenerator::new(StdRandom::seeded(1));
        let mut service = DemoService::new(&repo, generator, settings(3));

        let (plan, commits) = service.run(Flow::Good).unwrap();
        assert_eq!(commits.len(), 3);

        let mut expected = vec![GitCall::Checkout(plan.branch.to_string())];
        for commit in &commits {
            expected.push(GitCall::Stage(PathBuf::from("text.md")));
            expected.push(GitCall::Commit(commit.message.clone()));
        }
        assert_eq!(repo.calls(), expected);
        assert_eq!(repo.current_branch().unwrap(), plan.branch.as_str());
    }

    #[test]
    fn test_file_written_before_each_commit() {
        let temp = workspace();
        let repo = MockGitOps::new()
            .with_workdir(temp.path())
            .snapshot_on_commit(temp.path().join("text.md"));
        let generator = NameGenerator::new(StdRandom::seeded(5));
        let mut service = DemoService::new(&repo, generator, settings(2));

        let (_plan, commits) = service.run(Flow::Bad).unwrap();

        let snapshots = repo.snapshots();
        assert_eq!(snapshots.len(), 2);
        for (snapshot, commit) in snapshots.iter().zip(&commits) {
            assert_eq!(*snapshot, commit.buffer.to_text());
        }
        // each cycle starts from the previous commit's state
        let final_text = fs::read_to_string(temp.path().join("text.md")).unwrap();
        assert_eq!(final_text, commits[1].buffer.to_text());
        assert_eq!(
            commits[1].buffer.line(commits[0].change.index).map(str::to_string),
            if commits[0].change.index == commits[1].change.index {
                Some(commits[1].change.new_line.clone())
            } else {
                Some(commits[0].change.new_line.clone())
            }
        );
    }

    #[test]
    fn test_header_and_final_line_preserved() {
        let temp = workspace();
        let repo = MockGitOps::new().with_workdir(temp.path());
        let generator = NameGenerator::new(StdRandom::seeded(2));
        let mut service = DemoService::new(&repo, generator, settings(3));

        service.run(Flow::Good).unwrap();

        let text = fs::read_to_string(temp.path().join("text.md")).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(&lines[..2], ["# Notes", ""]);
        assert_eq!(lines[5], "");
    }

    #[test]
    fn test_existing_branch_refused() {
        let temp = workspace();
        let repo = MockGitOps::new()
            .with_workdir(temp.path())
            .with_branch("EAT-7");
        let generator = NameGenerator::new(ScriptedRandom::new([7]));
        let mut service = DemoService::new(&repo, generator, settings(1));

        let err = service.plan(Flow::Good).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_detached_head_refused() {
        let temp = workspace();
        let repo = MockGitOps::new().with_workdir(temp.path()).detached();
        let generator = NameGenerator::new(StdRandom::seeded(3));
        let mut service = DemoService::new(&repo, generator, settings(1));

        assert!(service.plan(Flow::Good).is_err());
    }

    #[test]
    fn test_short_file_fails_before_commit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("text.md"), "# Title\n\nonly\n").unwrap();
        let repo = MockGitOps::new().with_workdir(temp.path());
        let generator = NameGenerator::new(StdRandom::seeded(4));
        let mut service = DemoService::new(&repo, generator, settings(1));

        let err = service.run(Flow::Good).unwrap_err();
        assert!(format!("{err:#}").contains("lines"));
        // branch created, but nothing staged or committed
        assert_eq!(repo.calls().len(), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("text.md")).unwrap(),
            "# Title\n\nonly\n"
        );
    }

    #[test]
    fn test_commit_failure_stops_the_run() {
        let temp = workspace();
        let repo = MockGitOps::new()
            .with_workdir(temp.path())
            .fail_commit_after(1);
        let generator = NameGenerator::new(StdRandom::seeded(8));
        let mut service = DemoService::new(&repo, generator, settings(3));

        assert!(service.run(Flow::Good).is_err());
        let commits = repo
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GitCall::Commit(_)))
            .count();
        assert_eq!(commits, 2);
    }

    #[test]
    fn test_check_text_rejects_header_only_file() {
        let repo = MockGitOps::new();
        let generator = NameGenerator::new(StdRandom::seeded(3));
        let service = DemoService::new(&repo, generator, settings(1));

        assert!(service.check_text(&TextBuffer::parse("# Title\n\nbody\nmore\n")).is_ok());
        assert!(service.check_text(&TextBuffer::parse("# Title\n\nbody\n")).is_err());
    }

    #[test]
    fn test_missing_workdir() {
        let repo = MockGitOps::new();
        let generator = NameGenerator::new(StdRandom::seeded(3));
        let service = DemoService::new(&repo, generator, settings(1));
        assert!(service.load_text().is_err());
    }
}
