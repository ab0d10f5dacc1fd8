//! Merged branch detection
//!
//! Three steps, each usable on its own:
//! 1. Enumerate - collect candidate remote branches ([`enumerate_candidates`])
//! 2. Resolve - find the master head ([`resolve_master_head`])
//! 3. Scan - walk master's history looking for candidate heads, either
//!    sequentially or with a worker pool depending on candidate count
//!
//! [`find_merged_branches`] runs all three with a wall-clock deadline.
//!
//! [`resolve_master_head`]: crate::repo::resolve_master_head

mod cancel;
mod concurrent;
mod enumerate;
mod index;
mod observer;
mod sequential;

pub use cancel::{CancelToken, DeadlineGuard};
pub use concurrent::{scan_concurrent, worker_count};
pub use enumerate::enumerate_candidates;
pub use index::{CandidateIndex, FoundSet};
pub use observer::{NoopObserver, ScanObserver, TracingObserver};
pub use sequential::scan_sequential;

use crate::error::{Error, Result};
use crate::repo::{Repository, resolve_master_head};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Commits checked before a scan gives up and reports what it found
pub const DEFAULT_MAX_COMMITS: usize = 10_000;

/// Worker tasks used by the concurrent strategy
pub const DEFAULT_WORKERS: usize = 4;

/// Commits per batch handed to a worker
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Candidate count above which the concurrent strategy is used
pub const DEFAULT_CONCURRENCY_THRESHOLD: usize = 10;

/// Wall-clock limit for one scan
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Tuning knobs for a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Commit ceiling; branches merged further back are not reported
    pub max_commits: usize,
    /// Requested worker count (capped by available cores)
    pub workers: usize,
    /// Commits per batch in the concurrent strategy
    pub batch_size: usize,
    /// Use the concurrent strategy when there are more candidates than this
    pub concurrency_threshold: usize,
    /// Wall-clock deadline for the whole scan
    pub timeout: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_commits: DEFAULT_MAX_COMMITS,
            workers: DEFAULT_WORKERS,
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency_threshold: DEFAULT_CONCURRENCY_THRESHOLD,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// How the history walk is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One thread, commits visited in repository order
    Sequential,
    /// One producer and a pool of workers over batches
    Concurrent,
}

impl Strategy {
    /// Pick a strategy for `candidates` branches
    pub const fn for_candidates(candidates: usize, threshold: usize) -> Self {
        if candidates > threshold {
            Self::Concurrent
        } else {
            Self::Sequential
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent => write!(f, "concurrent"),
        }
    }
}

/// Why a successful scan stopped walking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The whole history was checked
    Exhausted,
    /// Every candidate was found before the end of history
    AllFound,
    /// The commit ceiling was hit; older merges may be missing
    Truncated,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::AllFound => write!(f, "all-found"),
            Self::Truncated => write!(f, "truncated"),
        }
    }
}

/// Result of a successful scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Merged branch names (`remote/short`), sorted, no duplicates
    pub merged: Vec<String>,
    /// Why the walk stopped
    pub termination: Termination,
    /// Commits taken from master's history
    pub commits_visited: usize,
    /// Strategy that produced this outcome
    pub strategy: Strategy,
}

impl ScanOutcome {
    /// Build an outcome, sorting and deduplicating `merged`
    pub fn new(
        mut merged: Vec<String>,
        termination: Termination,
        commits_visited: usize,
        strategy: Strategy,
    ) -> Self {
        merged.sort();
        merged.dedup();
        Self {
            merged,
            termination,
            commits_visited,
            strategy,
        }
    }

    /// Outcome for a scan with no candidates
    pub const fn empty(strategy: Strategy) -> Self {
        Self {
            merged: Vec::new(),
            termination: Termination::AllFound,
            commits_visited: 0,
            strategy,
        }
    }

    /// Whether the commit ceiling cut the walk short
    pub fn is_truncated(&self) -> bool {
        self.termination == Termination::Truncated
    }
}

/// Which remote branches to consider and against which master
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepTarget {
    /// Remote to clean up (e.g. "origin")
    pub remote: String,
    /// Master branch short name (e.g. "master")
    pub master: String,
    /// Short branch names that are never reported
    pub skip: HashSet<String>,
}

impl Default for SweepTarget {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            master: "master".to_string(),
            skip: HashSet::new(),
        }
    }
}

/// Find the remote branches already reachable from master
///
/// Configuration problems (unknown remote, missing master) are reported
/// before any history is read. The scan runs off the async runtime and is
/// bounded by `options.timeout`, which surfaces as [`Error::TimedOut`].
pub async fn find_merged_branches<R: Repository + 'static>(
    repo: Arc<R>,
    target: &SweepTarget,
    options: &ScanOptions,
    observer: Arc<dyn ScanObserver>,
    cancel: &CancelToken,
) -> Result<ScanOutcome> {
    let candidates = enumerate_candidates(
        &*repo,
        &target.remote,
        &target.master,
        &target.skip,
        observer.as_ref(),
    )?;
    let master_head = resolve_master_head(&*repo, &target.remote, &target.master)?;

    if candidates.is_empty() {
        info!(remote = %target.remote, "no branches found for the specified remote");
        return Ok(ScanOutcome::empty(Strategy::Sequential));
    }

    info!(
        remote = %target.remote,
        candidates = candidates.len(),
        "checking remote branches against master"
    );

    let strategy = Strategy::for_candidates(candidates.len(), options.concurrency_threshold);
    observer.strategy_selected(strategy, candidates.len());

    let _deadline = cancel.arm_deadline(options.timeout);

    match strategy {
        Strategy::Concurrent => {
            scan_concurrent(repo, master_head, &candidates, options, observer, cancel).await
        }
        Strategy::Sequential => {
            let options = options.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                scan_sequential(
                    &*repo,
                    master_head,
                    &candidates,
                    &options,
                    observer.as_ref(),
                    &cancel,
                )
            })
            .await
            .map_err(|e| Error::Internal(format!("history scan failed: {e}")))?
        }
    }
}
