//! `flowgen preview` command - Print generated names without touching git.

use std::path::Path;

use anyhow::Result;

use super::utils::{build_generator, load_config};
use crate::output;
use crate::services::{Flow, PreviewService};

/// Run the preview command.
pub fn run(
    pattern: Option<Flow>,
    count: usize,
    seed: Option<u64>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    // Works outside a repository; config comes from the enclosing one if any
    let config = load_config(config_path, None)?;
    let generator = build_generator(&config, seed)?;

    let flows = pattern.map_or_else(|| vec![Flow::Good, Flow::Bad], |flow| vec![flow]);
    let entries = PreviewService::new(generator).generate(&flows, count)?;

    if json {
        output::essential(&serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for flow in flows {
        output::heading(match flow {
            Flow::Good => "Good (ticket id)",
            Flow::Bad => "Bad (prefixed kebab-case)",
        });
        for entry in entries.iter().filter(|e| e.flow == flow) {
            output::essential(&format!("{:<32} {}", entry.branch.as_str(), entry.commit_message));
        }
    }

    Ok(())
}
