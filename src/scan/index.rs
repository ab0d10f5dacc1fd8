//! Candidate lookup and per-scan match tracking

use crate::scan::observer::ScanObserver;
use crate::types::{BranchHead, CommitRef};
use std::collections::{HashMap, HashSet};

/// Commit hash → branches pointing at it
///
/// Built once before the walk starts and only read afterwards, so the
/// concurrent strategy shares it between workers without locking.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    by_hash: HashMap<CommitRef, Vec<BranchHead>>,
    names: usize,
}

impl CandidateIndex {
    /// Index `candidates` by head commit
    pub fn build(candidates: &[BranchHead]) -> Self {
        let mut by_hash: HashMap<CommitRef, Vec<BranchHead>> =
            HashMap::with_capacity(candidates.len());
        let mut names = HashSet::with_capacity(candidates.len());

        for candidate in candidates {
            if names.insert(candidate.name.as_str()) {
                by_hash
                    .entry(candidate.hash)
                    .or_default()
                    .push(candidate.clone());
            }
        }

        Self {
            by_hash,
            names: names.len(),
        }
    }

    /// Branches whose head is `commit`
    pub fn get(&self, commit: &CommitRef) -> Option<&[BranchHead]> {
        self.by_hash.get(commit).map(Vec::as_slice)
    }

    /// Number of distinct branch names indexed
    pub const fn candidate_count(&self) -> usize {
        self.names
    }

    /// Whether there is nothing to look for
    pub const fn is_empty(&self) -> bool {
        self.names == 0
    }
}

/// Branches found so far, in discovery order
#[derive(Debug, Default)]
pub struct FoundSet {
    seen: HashSet<String>,
    merged: Vec<String>,
}

impl FoundSet {
    /// Record every not-yet-found branch whose head is `commit`
    pub fn visit(&mut self, commit: CommitRef, index: &CandidateIndex, observer: &dyn ScanObserver) {
        let Some(heads) = index.get(&commit) else {
            return;
        };
        for head in heads {
            if self.seen.insert(head.name.clone()) {
                observer.branch_merged(head, commit);
                self.merged.push(head.name.clone());
            }
        }
    }

    /// Number of branches found
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    /// Whether nothing has been found
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// Whether every indexed candidate has been found
    pub fn is_complete(&self, index: &CandidateIndex) -> bool {
        self.len() >= index.candidate_count()
    }

    /// Found branch names in discovery order
    pub fn into_names(self) -> Vec<String> {
        self.merged
    }
}
