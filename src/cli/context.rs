//! Shared command context for CLI commands
//!
//! Extracts the setup shared by preview and cleanup.

use anyhow::{Context, Result};
use gitsweeper::config::load_config;
use gitsweeper::repo::GitRepository;
use gitsweeper::scan::{CancelToken, ScanOptions, SweepTarget, TracingObserver};
use gitsweeper::{ScanOutcome, find_merged_branches};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::cli::style::{Stylize, check, spinner_style};

/// Flags shared by every command that scans for merged branches
#[derive(Debug, Clone, Default)]
pub struct TargetOverrides {
    /// Remote to clean up
    pub origin: Option<String>,
    /// Master branch name
    pub master: Option<String>,
    /// Comma-separated branch names to skip
    pub skip: Option<String>,
}

/// Shared context for CLI commands that scan a repository
///
/// This struct encapsulates:
/// - Opening the git repository
/// - Loading configuration and applying flag overrides
/// - Building the scan target and options
pub struct CommandContext {
    /// The opened repository
    pub repo: Arc<GitRepository>,
    /// Working tree root
    pub repo_root: PathBuf,
    /// Remote, master, and skip list for the scan
    pub target: SweepTarget,
    /// Scan limits
    pub options: ScanOptions,
    /// Time allowed for each branch deletion
    pub delete_timeout: Duration,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(path: &Path, overrides: &TargetOverrides) -> Result<Self> {
        let repo = GitRepository::discover(path).context("This is not a Git repository")?;
        let repo_root = repo.root().to_path_buf();

        let config = load_config(&repo_root)?.with_overrides(
            overrides.origin.as_deref(),
            overrides.master.as_deref(),
            overrides.skip.as_deref(),
        );
        let target = config.target();
        let options = config.scan_options();
        let delete_timeout = config.delete_timeout();

        Ok(Self {
            repo: Arc::new(repo),
            repo_root,
            target,
            options,
            delete_timeout,
        })
    }

    /// Scan for merged branches, showing a spinner unless `quiet`
    pub async fn find_merged(&self, quiet: bool) -> Result<ScanOutcome> {
        let cancel = CancelToken::new();
        let ctrl_c = cancel_on_ctrl_c(&cancel);

        let spinner = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        spinner.set_style(spinner_style());
        spinner.set_message(format!(
            "Checking {} branches against {}...",
            self.target.remote.emphasis(),
            self.target.master.emphasis()
        ));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = find_merged_branches(
            Arc::clone(&self.repo),
            &self.target,
            &self.options,
            Arc::new(TracingObserver),
            &cancel,
        )
        .await;
        ctrl_c.abort();

        match result {
            Ok(outcome) => {
                spinner.finish_with_message(format!(
                    "{} Checked {} commit(s) of {}",
                    check(),
                    outcome.commits_visited,
                    self.target.master.emphasis()
                ));
                Ok(outcome)
            }
            Err(e) => {
                spinner.finish_and_clear();
                Err(e).context("Error when looking for branches")
            }
        }
    }
}

/// Cancel `token` when the user presses Ctrl-C
fn cancel_on_ctrl_c(token: &CancelToken) -> JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}
