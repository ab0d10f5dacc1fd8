//! Scan event reporting
//!
//! Components receive an observer at construction instead of reaching for a
//! global logger. The CLI uses [`TracingObserver`]; tests use their own.

use crate::scan::Strategy;
use crate::types::{BranchHead, CommitRef};
use tracing::{debug, info, warn};

/// Receives notable events during enumeration and scanning
///
/// Called from blocking and worker threads, so implementations must be
/// `Send + Sync`. All methods default to doing nothing.
pub trait ScanObserver: Send + Sync {
    /// A candidate was dropped because its short name is on the skip list
    fn branch_skipped(&self, _branch: &BranchHead) {}

    /// A candidate's head was found in master's history
    fn branch_merged(&self, _branch: &BranchHead, _commit: CommitRef) {}

    /// The scanner picked a strategy for this candidate set
    fn strategy_selected(&self, _strategy: Strategy, _candidates: usize) {}

    /// The walk hit the commit ceiling before finishing
    fn truncated(&self, _max_commits: usize) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn branch_skipped(&self, branch: &BranchHead) {
        info!(
            branch = %branch.name,
            short = %branch.short,
            "branch matches skip list"
        );
    }

    fn branch_merged(&self, branch: &BranchHead, commit: CommitRef) {
        info!(
            branch = %branch.name,
            head = %commit,
            "branch head was found in master, so has been merged"
        );
    }

    fn strategy_selected(&self, strategy: Strategy, candidates: usize) {
        debug!(%strategy, candidates, "selected scan strategy");
    }

    fn truncated(&self, max_commits: usize) {
        warn!(
            max_commits,
            "reached maximum commit limit, branches merged before this point are not reported"
        );
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
