//! In-memory repository for scanner tests
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use gitsweeper::error::{Error, Result};
use gitsweeper::repo::{HistoryWalker, ReferenceStore};
use gitsweeper::types::{CommitRef, RefEntry};
use std::collections::{HashMap, HashSet, VecDeque};
use std::ops::ControlFlow;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Deterministic commit id for test commit number `n`
pub fn commit_id(n: u32) -> CommitRef {
    CommitRef::from_hex(&format!("{n:040x}")).unwrap()
}

/// Simple mock repository for testing
///
/// Commits are numbered; each one lists its parents. `walk` visits the start
/// commit and then its ancestors breadth-first, parents in insertion order.
///
/// Features:
/// - Remote-tracking, local, tag, and symbolic refs
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - Per-commit delay to simulate a slow history walk
pub struct MockRepository {
    remotes: Mutex<Vec<String>>,
    refs: Mutex<Vec<RefEntry>>,
    parents: Mutex<HashMap<CommitRef, Vec<CommitRef>>>,
    // Call tracking
    walk_calls: AtomicUsize,
    commits_yielded: AtomicUsize,
    references_calls: AtomicUsize,
    // Error injection
    error_on_remote_names: Mutex<Option<String>>,
    error_on_references: Mutex<Option<String>>,
    error_on_walk: Mutex<Option<String>>,
    error_on_walk_after: Mutex<Option<(usize, String)>>,
    // Latency injection
    walk_delay: Mutex<Option<Duration>>,
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepository {
    /// Create an empty repository with no remotes
    pub fn new() -> Self {
        Self {
            remotes: Mutex::new(Vec::new()),
            refs: Mutex::new(Vec::new()),
            parents: Mutex::new(HashMap::new()),
            walk_calls: AtomicUsize::new(0),
            commits_yielded: AtomicUsize::new(0),
            references_calls: AtomicUsize::new(0),
            error_on_remote_names: Mutex::new(None),
            error_on_references: Mutex::new(None),
            error_on_walk: Mutex::new(None),
            error_on_walk_after: Mutex::new(None),
            walk_delay: Mutex::new(None),
        }
    }

    /// Create a repository with a single `origin` remote
    pub fn with_origin() -> Self {
        let repo = Self::new();
        repo.add_remote("origin");
        repo
    }

    // === Builders ===

    /// Configure a remote
    pub fn add_remote(&self, name: &str) {
        self.remotes.lock().unwrap().push(name.to_string());
    }

    /// Add commit `n` with the given parent commits
    pub fn add_commit(&self, n: u32, parents: &[u32]) -> CommitRef {
        let id = commit_id(n);
        self.parents
            .lock()
            .unwrap()
            .insert(id, parents.iter().map(|p| commit_id(*p)).collect());
        id
    }

    /// Add a linear history `1 <- 2 <- ... <- len` and return the tip
    pub fn add_linear_history(&self, len: u32) -> CommitRef {
        self.add_commit(1, &[]);
        for n in 2..=len {
            self.add_commit(n, &[n - 1]);
        }
        commit_id(len)
    }

    /// Point a fully qualified ref at commit `n`
    pub fn add_ref(&self, full_name: &str, n: u32) {
        self.refs
            .lock()
            .unwrap()
            .push(RefEntry::direct(full_name, commit_id(n)));
    }

    /// Point `refs/remotes/<remote>/<short>` at commit `n`
    pub fn add_remote_branch(&self, remote: &str, short: &str, n: u32) {
        self.add_ref(&format!("refs/remotes/{remote}/{short}"), n);
    }

    /// Point `refs/heads/<short>` at commit `n`
    pub fn add_local_branch(&self, short: &str, n: u32) {
        self.add_ref(&format!("refs/heads/{short}"), n);
    }

    /// Add a symbolic ref
    pub fn add_symbolic_ref(&self, full_name: &str, target: &str) {
        self.refs
            .lock()
            .unwrap()
            .push(RefEntry::symbolic(full_name, target));
    }

    // === Error injection methods ===

    /// Make `remote_names` return an error
    pub fn fail_remote_names(&self, msg: &str) {
        *self.error_on_remote_names.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `references` return an error
    pub fn fail_references(&self, msg: &str) {
        *self.error_on_references.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `walk` fail before yielding anything
    pub fn fail_walk(&self, msg: &str) {
        *self.error_on_walk.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `walk` fail after yielding `count` commits
    pub fn fail_walk_after(&self, count: usize, msg: &str) {
        *self.error_on_walk_after.lock().unwrap() = Some((count, msg.to_string()));
    }

    /// Sleep for `delay` before yielding each commit
    pub fn slow_walk(&self, delay: Duration) {
        *self.walk_delay.lock().unwrap() = Some(delay);
    }

    // === Call tracking ===

    /// Number of `walk` calls
    pub fn walk_calls(&self) -> usize {
        self.walk_calls.load(Ordering::SeqCst)
    }

    /// Total commits handed to visitors across all walks
    pub fn commits_yielded(&self) -> usize {
        self.commits_yielded.load(Ordering::SeqCst)
    }

    /// Number of `references` calls
    pub fn references_calls(&self) -> usize {
        self.references_calls.load(Ordering::SeqCst)
    }
}

impl ReferenceStore for MockRepository {
    fn remote_names(&self) -> Result<Vec<String>> {
        if let Some(msg) = self.error_on_remote_names.lock().unwrap().clone() {
            return Err(Error::git("list remotes", msg));
        }
        Ok(self.remotes.lock().unwrap().clone())
    }

    fn references(&self) -> Result<Vec<RefEntry>> {
        self.references_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.error_on_references.lock().unwrap().clone() {
            return Err(Error::git("list references", msg));
        }
        Ok(self.refs.lock().unwrap().clone())
    }

    fn resolve(&self, full_name: &str) -> Result<Option<CommitRef>> {
        Ok(self
            .refs
            .lock()
            .unwrap()
            .iter()
            .find(|entry| entry.name == full_name)
            .and_then(RefEntry::hash))
    }
}

impl HistoryWalker for MockRepository {
    fn walk(
        &self,
        start: CommitRef,
        visit: &mut dyn FnMut(CommitRef) -> ControlFlow<()>,
    ) -> Result<()> {
        self.walk_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.error_on_walk.lock().unwrap().clone() {
            return Err(Error::git("walk history", msg));
        }
        let fail_after = self.error_on_walk_after.lock().unwrap().clone();
        let delay = *self.walk_delay.lock().unwrap();

        let parents = self.parents.lock().unwrap().clone();
        if !parents.contains_key(&start) {
            return Err(Error::git("walk history", format!("unknown commit {start}")));
        }

        let mut queue = VecDeque::from([start]);
        let mut seen = HashSet::from([start]);
        let mut yielded = 0usize;

        while let Some(commit) = queue.pop_front() {
            if let Some((limit, msg)) = &fail_after
                && yielded >= *limit
            {
                return Err(Error::git("walk history", msg.clone()));
            }
            if let Some(delay) = delay {
                std::thread::sleep(delay);
            }
            yielded += 1;
            self.commits_yielded.fetch_add(1, Ordering::SeqCst);
            if visit(commit).is_break() {
                return Ok(());
            }
            for parent in parents.get(&commit).into_iter().flatten() {
                if seen.insert(*parent) {
                    queue.push_back(*parent);
                }
            }
        }
        Ok(())
    }
}

/// Commit id made of one repeated hex digit, e.g. `hash('1')` is `111...1`
pub fn hash(digit: char) -> CommitRef {
    CommitRef::from_hex(&digit.to_string().repeat(40)).unwrap()
}

/// History walker that yields a fixed list of commits regardless of start
pub struct FixedHistory {
    commits: Vec<CommitRef>,
    yielded: AtomicUsize,
}

impl FixedHistory {
    /// Walker yielding `commits` in order
    pub fn new(commits: Vec<CommitRef>) -> Self {
        Self {
            commits,
            yielded: AtomicUsize::new(0),
        }
    }

    /// Commits handed to visitors so far
    pub fn yielded(&self) -> usize {
        self.yielded.load(Ordering::SeqCst)
    }
}

impl HistoryWalker for FixedHistory {
    fn walk(
        &self,
        _start: CommitRef,
        visit: &mut dyn FnMut(CommitRef) -> ControlFlow<()>,
    ) -> Result<()> {
        for commit in &self.commits {
            self.yielded.fetch_add(1, Ordering::SeqCst);
            if visit(*commit).is_break() {
                break;
            }
        }
        Ok(())
    }
}
