//! Remote branch deletion
//!
//! Deletion sits behind [`BranchDeleter`] so the cleanup flow does not care
//! how a branch is removed. [`GitPushDeleter`] shells out to `git push`.

mod git_push;

pub use git_push::{DELETE_TIMEOUT, GitPushDeleter};

use crate::error::{Error, Result};
use async_trait::async_trait;

/// What happened when deleting one branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The branch existed and was removed
    Deleted,
    /// The remote no longer had the branch
    AlreadyGone,
}

/// Capability to remove a branch from a remote
#[async_trait]
pub trait BranchDeleter: Send + Sync {
    /// Delete `branch` (short name) on `remote`
    ///
    /// Deleting a branch that is already gone must return
    /// [`DeleteOutcome::AlreadyGone`], not an error.
    async fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<DeleteOutcome>;
}

/// Reject names git would treat as options or that are empty
pub fn validate_delete_args(remote: &str, branch: &str) -> Result<()> {
    if remote.is_empty() {
        return Err(Error::InvalidBranchName(
            "remote name cannot be empty".to_string(),
        ));
    }
    if branch.is_empty() {
        return Err(Error::InvalidBranchName(
            "branch name cannot be empty".to_string(),
        ));
    }
    if remote.starts_with('-') {
        return Err(Error::InvalidBranchName(format!(
            "remote name cannot start with '-': {remote}"
        )));
    }
    if branch.starts_with('-') {
        return Err(Error::InvalidBranchName(format!(
            "branch name cannot start with '-': {branch}"
        )));
    }
    Ok(())
}
