//! Error types for gitsweeper

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by branch discovery and cleanup
#[derive(Debug, Error)]
pub enum Error {
    /// The given path is not inside a git repository
    #[error("repository does not exist: {0}")]
    NotARepository(String),

    /// The requested remote is not configured in the repository
    #[error("Could not find the remote named {0}")]
    RemoteNotFound(String),

    /// Neither a local nor a remote-tracking master branch exists
    #[error("master branch {0} not found")]
    MasterNotFound(String),

    /// A git storage operation failed
    #[error("{op} failed: {message}")]
    Git {
        /// Operation that failed (e.g. "list remote branches")
        op: &'static str,
        /// Underlying error message
        message: String,
    },

    /// A branch or remote name was rejected before running git
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    /// Deleting a branch on the remote failed
    #[error("failed to delete branch {branch} on remote {remote}: {message}")]
    Delete {
        /// Remote the branch lives on
        remote: String,
        /// Short branch name
        branch: String,
        /// git output or process error
        message: String,
    },

    /// The scan was cancelled by the caller
    #[error("scan cancelled")]
    Cancelled,

    /// The scan exceeded its wall-clock deadline
    #[error("scan timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Unexpected internal failure (task join errors, prompt I/O)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a [`Error::Git`] from any displayable error
    pub fn git(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Git {
            op,
            message: err.to_string(),
        }
    }

    /// Whether the scan was stopped by cancellation or deadline
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut(_))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
