//! Cleanup command - delete remote branches already merged into master

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, TargetOverrides};
use crate::cli::preview::{print_merged_list, print_truncation_warning};
use crate::cli::style::{Stylize, check};
use anstream::println;
use anyhow::{Result, anyhow, bail};
use dialoguer::Confirm;
use gitsweeper::cleanup::{CleanupResult, create_cleanup_plan, execute_cleanup};
use gitsweeper::delete::GitPushDeleter;
use std::path::Path;

/// Options for the cleanup command
#[derive(Debug, Clone, Default)]
pub struct CleanupOptions {
    /// Delete without asking for confirmation
    pub force: bool,
}

/// Run the cleanup command
pub async fn run_cleanup(
    path: &Path,
    overrides: &TargetOverrides,
    options: CleanupOptions,
) -> Result<()> {
    // =========================================================================
    // Phase 1: GATHER - scan for merged branches
    // =========================================================================

    let ctx = CommandContext::new(path, overrides)?;
    let outcome = ctx.find_merged(false).await?;

    if outcome.merged.is_empty() {
        println!(
            "{}",
            "No remote branches are available for cleaning up".muted()
        );
        return Ok(());
    }

    // =========================================================================
    // Phase 2: PLAN - pure
    // =========================================================================

    let plan = create_cleanup_plan(&outcome.merged);

    print_merged_list(&outcome);
    print_truncation_warning(&outcome, ctx.options.max_commits);
    for name in &plan.rejected {
        println!(
            "{}",
            format!("Skipping {name}: not a remote branch name").warn()
        );
    }
    println!();

    if plan.is_empty() {
        println!(
            "{}",
            "No remote branches are available for cleaning up".muted()
        );
        return Ok(());
    }

    // =========================================================================
    // Phase 3: EXECUTE - effectful
    // =========================================================================

    if !options.force
        && !Confirm::new()
            .with_prompt("Delete these branches?")
            .default(false)
            .interact()
            .map_err(|e| anyhow!("Failed to read confirmation: {e}"))?
    {
        println!("{}", "OK, aborting.".muted());
        return Ok(());
    }

    let deleter = GitPushDeleter::new(&ctx.repo_root).with_timeout(ctx.delete_timeout);
    let result = execute_cleanup(&plan, &deleter, &CliProgress).await?;

    print_cleanup_summary(&result);

    if let Some(failed) = result.failed_branch {
        bail!("Failed to delete {failed}");
    }

    Ok(())
}

/// Print cleanup summary
fn print_cleanup_summary(result: &CleanupResult) {
    println!();
    if result.is_success() {
        println!(
            "{} {}",
            check(),
            format!("Removed {} branch(es)", result.removed_count()).success()
        );
    } else {
        println!("{}", "Cleanup partially complete".warn());
    }

    if !result.already_gone.is_empty() {
        println!(
            "   Already gone: {}",
            result.already_gone.join(", ").muted()
        );
    }

    if let Some(ref failed) = result.failed_branch {
        println!("   {} {}", "Failed:".warn(), failed.warn());
        if let Some(ref msg) = result.error_message {
            println!("          {}", msg.muted());
        }
    }
}
