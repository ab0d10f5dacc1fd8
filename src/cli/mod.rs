//! CLI commands and shared terminal output

mod cleanup;
mod context;
mod preview;
mod style;

pub use cleanup::{CleanupOptions, run_cleanup};
pub use context::TargetOverrides;
pub use preview::{PreviewOptions, run_preview};

use anstream::{print, println};
use async_trait::async_trait;
use gitsweeper::cleanup::ProgressCallback;
use gitsweeper::delete::DeleteOutcome;
use std::io::Write;
use style::Stylize;

/// Progress output for branch deletion
///
/// Prints `  deleting <branch>` and completes the line once git returns.
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_delete_started(&self, _remote: &str, branch: &str) {
        print!("  deleting {}", branch.accent());
        if let Err(e) = anstream::stdout().flush() {
            tracing::debug!(error = %e, "failed to flush stdout");
        }
    }

    async fn on_delete_finished(&self, _remote: &str, _branch: &str, outcome: DeleteOutcome) {
        match outcome {
            DeleteOutcome::Deleted => println!(" - {}", "(done)".success()),
            DeleteOutcome::AlreadyGone => println!(" - {}", "(already gone)".muted()),
        }
    }

    async fn on_delete_failed(&self, _remote: &str, _branch: &str, _error: &str) {
        println!(" - {}", "(failed)".warn());
    }
}
