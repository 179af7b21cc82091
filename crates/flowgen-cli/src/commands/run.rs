//! `flowgen good` / `flowgen bad` - create a branch with synthetic commits.

use std::path::Path;

use anyhow::{Context, Result};
use flowgen_core::{CountRange, GitBackend, NameGenerator, RandomSource};
use flowgen_git::{GitCli, GitOps, SystemRunner};

use super::RunArgs;
use super::utils::{EchoRunner, build_generator, load_config, open_repo};
use crate::output;
use crate::services::{DemoService, DemoSettings, Flow, PendingCommit, RunPlan};

/// Run a demo flow.
pub fn run(flow: Flow, args: &RunArgs, config_path: Option<&Path>) -> Result<()> {
    let (repo, workdir) = open_repo()?;
    let config = load_config(config_path, Some(&workdir))?;

    let commits = match args.commits {
        Some(n) => CountRange::new(n.into(), n.into())?,
        None => config.commit_range().context("Invalid commit range in config")?,
    };
    let settings = DemoSettings {
        text_file: args
            .file
            .clone()
            .unwrap_or_else(|| config.general.text_file.clone()),
        header_lines: config.general.header_lines,
        commits,
    };
    let generator = build_generator(&config, args.seed)?;
    let ticket_prefix = config.naming.ticket_prefix.clone();

    let backend = args.backend.map_or(config.git.backend, GitBackend::from);
    tracing::debug!(?backend, workdir = %workdir.display(), "starting run");

    match backend {
        GitBackend::Cli => {
            let git = GitCli::new(EchoRunner::new(SystemRunner), &workdir);
            execute(&git, generator, settings, flow, &ticket_prefix, args.dry_run)
        }
        GitBackend::Libgit2 => execute(&repo, generator, settings, flow, &ticket_prefix, args.dry_run),
    }
}

fn execute<G: GitOps, R: RandomSource>(
    repo: &G,
    generator: NameGenerator<R>,
    settings: DemoSettings,
    flow: Flow,
    ticket_prefix: &str,
    dry_run: bool,
) -> Result<()> {
    let mut service = DemoService::new(repo, generator, settings);

    print_banner(flow);
    let plan = service.plan(flow)?;
    print_branch(&plan, ticket_prefix);

    // Read the file up front so a missing or short file fails before the branch exists.
    let mut buffer = service.load_text()?;
    service.check_text(&buffer)?;

    if dry_run {
        output::warn("Dry run - no files or branches will be changed");
    } else {
        output::detail(&format!("Creating branch: {}", plan.branch));
        service.create_branch(&plan)?;
    }

    output::heading(&format!("Will create {} commit(s)", plan.commit_count));

    for number in 1..=plan.commit_count {
        if !dry_run && number > 1 {
            buffer = service.load_text()?;
        }
        let pending = service.prepare_commit(number, &buffer)?;
        print_commit(&pending);

        if dry_run {
            buffer = pending.buffer;
        } else {
            service.apply_commit(&pending)?;
        }
    }

    print_summary(&plan, ticket_prefix, dry_run);
    Ok(())
}

fn print_banner(flow: Flow) {
    let title = match flow {
        Flow::Good => "=== Good Pattern (Following Gitflow Guidelines) ===",
        Flow::Bad => "=== Bad Pattern (NOT Following Gitflow Guidelines) ===",
    };
    output::heading(title);
}

fn print_branch(plan: &RunPlan, ticket_prefix: &str) {
    match plan.flow {
        Flow::Good => {
            output::info(&format!("Ticket ID: {}", plan.branch));
            output::detail(&format!(
                "  {} Branch name is the ticket ID ({ticket_prefix}-XXXX)",
                output::verdict(true)
            ));
        }
        Flow::Bad => {
            output::info(&format!("Branch name: {}", plan.branch));
            output::detail(&format!(
                "  {} Uses prefix like feature/, fix/, hotfix/",
                output::verdict(false)
            ));
            output::detail(&format!(
                "  {} No ticket ID in branch name",
                output::verdict(false)
            ));
        }
    }
    output::info(&format!("Current branch: {}", plan.original_branch));
}

fn print_commit(pending: &PendingCommit) {
    let change = &pending.change;
    output::heading(&format!("--- Commit {} ---", pending.number));
    output::detail(&format!("Modifying line {}:", change.line_number()));
    output::detail(&format!("  Old: {}", output::quoted(&change.old_line)));
    output::detail(&format!("  New: {}", output::quoted(&change.new_line)));
    output::detail(&format!("Commit message: {}", output::quoted(&pending.message)));
}

fn print_summary(plan: &RunPlan, ticket_prefix: &str, dry_run: bool) {
    output::heading("=== Done! ===");
    output::hr();
    if dry_run {
        output::success(&format!(
            "Branch \"{}\" would be created with {} commit(s).",
            plan.branch, plan.commit_count
        ));
    } else {
        output::success(&format!(
            "Branch \"{}\" created with {} commit(s).",
            plan.branch, plan.commit_count
        ));
    }
    output::essential(&plan.branch);

    match plan.flow {
        Flow::Good => {
            output::detail("This follows the gitflow guidelines:");
            output::detail(&format!(
                "  - Branch name is the ticket ID ({ticket_prefix}-XXXX)"
            ));
            output::detail("  - Uses conventional commit format (feat/fix/chore/docs)");
        }
        Flow::Bad => {
            output::detail("This VIOLATES the gitflow guidelines:");
            output::detail(
                "  - Branch name uses prefix (feature/, fix/, etc.) instead of ticket ID",
            );
            output::detail(
                "  - Branch name is lowercase kebab-case instead of TICKET-ID format",
            );
        }
    }
}
