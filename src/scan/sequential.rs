//! Single-threaded history scan

use crate::error::Result;
use crate::repo::HistoryWalker;
use crate::scan::cancel::CancelToken;
use crate::scan::index::{CandidateIndex, FoundSet};
use crate::scan::observer::ScanObserver;
use crate::scan::{ScanOptions, ScanOutcome, Strategy, Termination};
use crate::types::{BranchHead, CommitRef};
use std::ops::ControlFlow;

/// Walk master's history in order and report which candidates it contains
///
/// Stops as soon as every candidate is found, or gracefully once
/// `options.max_commits` commits have been checked. Blocks on repository I/O.
pub fn scan_sequential(
    walker: &dyn HistoryWalker,
    master_head: CommitRef,
    candidates: &[BranchHead],
    options: &ScanOptions,
    observer: &dyn ScanObserver,
    cancel: &CancelToken,
) -> Result<ScanOutcome> {
    let index = CandidateIndex::build(candidates);
    if index.is_empty() {
        return Ok(ScanOutcome::empty(Strategy::Sequential));
    }

    let mut found = FoundSet::default();
    let mut visited = 0usize;
    let mut termination = Termination::Exhausted;

    walker.walk(master_head, &mut |commit| {
        if cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        if visited >= options.max_commits {
            termination = Termination::Truncated;
            return ControlFlow::Break(());
        }
        visited += 1;

        found.visit(commit, &index, observer);
        if found.is_complete(&index) {
            termination = Termination::AllFound;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })?;

    cancel.check()?;
    if termination == Termination::Truncated {
        observer.truncated(options.max_commits);
    }

    Ok(ScanOutcome::new(
        found.into_names(),
        termination,
        visited,
        Strategy::Sequential,
    ))
}
