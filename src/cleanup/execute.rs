//! Cleanup execution - effectful operations
//!
//! Takes a `CleanupPlan` (created by the pure planning function) and deletes
//! each branch through a [`BranchDeleter`].

use crate::cleanup::plan::CleanupPlan;
use crate::delete::{BranchDeleter, DeleteOutcome};
use crate::error::Result;
use async_trait::async_trait;

/// Receives progress messages while branches are deleted
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A deletion is about to start
    async fn on_delete_started(&self, remote: &str, branch: &str);

    /// A deletion finished
    async fn on_delete_finished(&self, remote: &str, branch: &str, outcome: DeleteOutcome);

    /// A deletion failed; execution stops after this
    async fn on_delete_failed(&self, remote: &str, branch: &str, error: &str);
}

/// Progress callback that reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_delete_started(&self, _remote: &str, _branch: &str) {}
    async fn on_delete_finished(&self, _remote: &str, _branch: &str, _outcome: DeleteOutcome) {}
    async fn on_delete_failed(&self, _remote: &str, _branch: &str, _error: &str) {}
}

/// Result of cleanup execution
#[derive(Debug, Clone, Default)]
pub struct CleanupResult {
    /// Branches removed from the remote
    pub deleted: Vec<String>,
    /// Branches that were already gone
    pub already_gone: Vec<String>,
    /// Branch where deletion failed (if any)
    pub failed_branch: Option<String>,
    /// Error message from the failed deletion (if any)
    pub error_message: Option<String>,
}

impl CleanupResult {
    /// Check if every planned deletion succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed_branch.is_none()
    }

    /// Number of branches no longer on the remote
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.deleted.len() + self.already_gone.len()
    }
}

/// Execute the cleanup plan (EFFECTFUL)
///
/// Deletes branches in plan order and stops at the first failure, recording
/// what succeeded before it.
pub async fn execute_cleanup(
    plan: &CleanupPlan,
    deleter: &dyn BranchDeleter,
    progress: &dyn ProgressCallback,
) -> Result<CleanupResult> {
    let mut result = CleanupResult::default();

    for step in &plan.steps {
        progress.on_delete_started(&step.remote, &step.branch).await;

        match deleter.delete_remote_branch(&step.remote, &step.branch).await {
            Ok(outcome) => {
                progress
                    .on_delete_finished(&step.remote, &step.branch, outcome)
                    .await;
                match outcome {
                    DeleteOutcome::Deleted => result.deleted.push(step.name.clone()),
                    DeleteOutcome::AlreadyGone => result.already_gone.push(step.name.clone()),
                }
            }
            Err(e) => {
                let message = e.to_string();
                progress
                    .on_delete_failed(&step.remote, &step.branch, &message)
                    .await;
                result.failed_branch = Some(step.name.clone());
                result.error_message = Some(message);
                break;
            }
        }
    }

    Ok(result)
}
