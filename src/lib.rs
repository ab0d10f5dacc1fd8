//! gitsweeper - find and delete remote branches already merged into master
//!
//! A remote branch counts as merged when its head commit is reachable from
//! master's head. The library enumerates remote-tracking refs, walks master's
//! history once (sequentially or with a worker pool, depending on how many
//! branches are checked) and reports which branch heads it met.
//!
//! ```text
//! GitRepository ──► enumerate_candidates ──► CandidateIndex
//!                                                │
//!          master head ──► history walk ─────────┤ (sequential | concurrent)
//!                                                ▼
//!                                           ScanOutcome ──► CleanupPlan ──► BranchDeleter
//! ```

pub mod cleanup;
pub mod config;
pub mod delete;
pub mod error;
pub mod refs;
pub mod repo;
pub mod scan;
pub mod types;

pub use error::{Error, Result};
pub use scan::{ScanOptions, ScanOutcome, SweepTarget, find_merged_branches};
