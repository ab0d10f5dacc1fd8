//! Preview command - list remote branches already merged into master

use crate::cli::context::{CommandContext, TargetOverrides};
use crate::cli::style::Stylize;
use anstream::println;
use anyhow::Result;
use gitsweeper::ScanOutcome;
use serde::Serialize;
use std::path::Path;

/// Options for the preview command
#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    /// Print a JSON report instead of the human-readable list
    pub json: bool,
}

/// Machine-readable preview output
#[derive(Debug, Serialize)]
struct PreviewReport<'a> {
    remote: &'a str,
    master: &'a str,
    merged: &'a [String],
    strategy: String,
    termination: String,
    commits_visited: usize,
    truncated: bool,
}

/// Run the preview command
pub async fn run_preview(
    path: &Path,
    overrides: &TargetOverrides,
    options: PreviewOptions,
) -> Result<()> {
    let ctx = CommandContext::new(path, overrides)?;
    let outcome = ctx.find_merged(options.json).await?;

    if options.json {
        let report = PreviewReport {
            remote: &ctx.target.remote,
            master: &ctx.target.master,
            merged: &outcome.merged,
            strategy: outcome.strategy.to_string(),
            termination: outcome.termination.to_string(),
            commits_visited: outcome.commits_visited,
            truncated: outcome.is_truncated(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if outcome.merged.is_empty() {
        println!("{}", "No branches already merged into master!".success());
        print_truncation_warning(&outcome, ctx.options.max_commits);
        return Ok(());
    }

    print_merged_list(&outcome);
    print_truncation_warning(&outcome, ctx.options.max_commits);
    println!();
    println!(
        "{}",
        "To delete them, run again with `gitsweeper cleanup`".muted()
    );

    Ok(())
}

/// Print the merged branches, one per line
pub fn print_merged_list(outcome: &ScanOutcome) {
    println!();
    println!("{}", "These branches have been merged into master:".emphasis());
    for name in &outcome.merged {
        println!("  {}", name.accent());
    }
}

/// Warn when the commit ceiling may have hidden older merges
pub fn print_truncation_warning(outcome: &ScanOutcome, max_commits: usize) {
    if outcome.is_truncated() {
        println!();
        println!(
            "{}",
            format!(
                "Only the latest {max_commits} commits of master were checked; older merges may be missing."
            )
            .warn()
        );
    }
}
