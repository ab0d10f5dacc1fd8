//! Repository access
//!
//! The scanner only ever talks to a repository through these two traits, so
//! tests can drive it with in-memory fixtures and the CLI with gix.

mod git;

pub use git::GitRepository;

use crate::error::{Error, Result};
use crate::refs::{HEADS_PREFIX, REMOTES_PREFIX};
use crate::types::{CommitRef, RefEntry};
use std::ops::ControlFlow;
use tracing::debug;

/// Read-only view of a repository's references
pub trait ReferenceStore: Send + Sync {
    /// Names of all configured remotes
    fn remote_names(&self) -> Result<Vec<String>>;

    /// Every reference in the repository with its raw target
    fn references(&self) -> Result<Vec<RefEntry>>;

    /// Resolve a fully qualified reference to the commit it points at
    ///
    /// Returns `Ok(None)` when the reference does not exist.
    fn resolve(&self, full_name: &str) -> Result<Option<CommitRef>>;
}

/// Ancestor traversal starting at a commit
pub trait HistoryWalker: Send + Sync {
    /// Visit `start` and its ancestors in the repository's traversal order
    ///
    /// The visitor returns [`ControlFlow::Break`] to stop the walk early;
    /// stopping this way is not an error.
    fn walk(
        &self,
        start: CommitRef,
        visit: &mut dyn FnMut(CommitRef) -> ControlFlow<()>,
    ) -> Result<()>;
}

/// Everything a scan needs from a repository
pub trait Repository: ReferenceStore + HistoryWalker {}

impl<T: ReferenceStore + HistoryWalker> Repository for T {}

/// Find the commit master points at
///
/// Prefers the local branch and falls back to the remote-tracking ref, which
/// is all a fresh CI checkout may have.
pub fn resolve_master_head(
    store: &dyn ReferenceStore,
    remote: &str,
    master: &str,
) -> Result<CommitRef> {
    let local = format!("{HEADS_PREFIX}{master}");
    if let Some(hash) = store.resolve(&local)? {
        debug!(reference = %local, %hash, "resolved master head");
        return Ok(hash);
    }

    let tracking = format!("{REMOTES_PREFIX}{remote}/{master}");
    if let Some(hash) = store.resolve(&tracking)? {
        debug!(reference = %tracking, %hash, "resolved master head from remote-tracking ref");
        return Ok(hash);
    }

    Err(Error::MasterNotFound(master.to_string()))
}
