//! Branch deletion via `git push --delete`
//!
//! Uses the system git so the user's existing credentials (SSH agent,
//! credential helpers, tokens) apply without extra configuration.

use crate::delete::{BranchDeleter, DeleteOutcome, validate_delete_args};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Time allowed for one `git push --delete`
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(30);

/// Output git prints when the branch is not on the remote anymore
const ALREADY_GONE_MARKER: &str = "remote ref does not exist";

/// Deletes remote branches by running `git push <remote> --delete <branch>`
#[derive(Debug, Clone)]
pub struct GitPushDeleter {
    repo_root: PathBuf,
    git: PathBuf,
    timeout: Duration,
}

impl GitPushDeleter {
    /// Create a deleter running git in `repo_root`
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            git: PathBuf::from("git"),
            timeout: DELETE_TIMEOUT,
        }
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    /// Override the per-branch timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl BranchDeleter for GitPushDeleter {
    async fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<DeleteOutcome> {
        validate_delete_args(remote, branch)?;
        debug!(remote, branch, "deleting remote branch");

        let delete_error = |message: String| Error::Delete {
            remote: remote.to_string(),
            branch: branch.to_string(),
            message,
        };

        // Arguments are passed separately, never through a shell
        let child = Command::new(&self.git)
            .args(["push", remote, "--delete", branch])
            .current_dir(&self.repo_root)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| delete_error(format!("failed to run git: {e}")))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| delete_error(format!("timed out after {}s", self.timeout.as_secs())))?
            .map_err(|e| delete_error(format!("failed to wait for git: {e}")))?;

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let trimmed = combined.trim();

        if output.status.success() {
            debug!(remote, branch, "deleted remote branch");
            return Ok(DeleteOutcome::Deleted);
        }

        if is_already_gone(trimmed) {
            debug!(remote, branch, "branch already deleted on remote");
            return Ok(DeleteOutcome::AlreadyGone);
        }

        Err(delete_error(format!("{}\nOutput: {trimmed}", output.status)))
    }
}

fn is_already_gone(output: &str) -> bool {
    output.to_lowercase().contains(ALREADY_GONE_MARKER)
}
