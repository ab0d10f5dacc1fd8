//! Shared test fixtures

#![allow(dead_code)]

mod mock_deleter;
mod mock_repo;
mod temp_repo;

pub use mock_deleter::{DeleteCall, MockDeleter};
pub use mock_repo::{FixedHistory, MockRepository, commit_id, hash};
pub use temp_repo::{TempGitRepo, git};

use gitsweeper::scan::{CancelToken, NoopObserver, ScanOptions, SweepTarget};
use gitsweeper::{Result, ScanOutcome, find_merged_branches};
use std::collections::HashSet;
use std::sync::Arc;

/// Target for `origin`/`master` skipping the given short names
pub fn origin_target(skip: &[&str]) -> SweepTarget {
    SweepTarget {
        remote: "origin".to_string(),
        master: "master".to_string(),
        skip: skip.iter().map(|s| (*s).to_string()).collect::<HashSet<_>>(),
    }
}

/// Options forcing one strategy: threshold 0 means concurrent
pub fn options_with_threshold(threshold: usize) -> ScanOptions {
    ScanOptions {
        concurrency_threshold: threshold,
        ..ScanOptions::default()
    }
}

/// Run a full scan against a mock without observers or cancellation
pub async fn scan_mock(
    repo: &Arc<MockRepository>,
    target: &SweepTarget,
    options: &ScanOptions,
) -> Result<ScanOutcome> {
    find_merged_branches(
        Arc::clone(repo),
        target,
        options,
        Arc::new(NoopObserver),
        &CancelToken::new(),
    )
    .await
}
