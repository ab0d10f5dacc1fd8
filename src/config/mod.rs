//! Sweep configuration
//!
//! Values come from (highest priority first) command-line flags, the
//! repository's `.gitsweeper.toml`, the user's global config file, and the
//! built-in defaults.

mod storage;

pub use storage::{REPO_CONFIG_FILE, global_config_path, load_config, repo_config_path};

use crate::delete::DELETE_TIMEOUT;
use crate::scan::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY_THRESHOLD, DEFAULT_MAX_COMMITS, DEFAULT_WORKERS,
    ScanOptions, SweepTarget,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Default remote to clean up
pub const DEFAULT_ORIGIN: &str = "origin";

/// Default master branch name
pub const DEFAULT_MASTER: &str = "master";

/// Default scan deadline in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Scan tuning section (`[scan]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Commit ceiling for the history walk
    pub max_commits: usize,
    /// Worker count for the concurrent strategy
    pub workers: usize,
    /// Commits per worker batch
    pub batch_size: usize,
    /// Candidate count above which workers are used
    pub concurrency_threshold: usize,
    /// Wall-clock deadline in seconds
    pub timeout_secs: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_commits: DEFAULT_MAX_COMMITS,
            workers: DEFAULT_WORKERS,
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency_threshold: DEFAULT_CONCURRENCY_THRESHOLD,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Branch deletion section (`[delete]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteSettings {
    /// Seconds allowed for each `git push --delete`
    pub timeout_secs: u64,
}

impl Default for DeleteSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DELETE_TIMEOUT.as_secs(),
        }
    }
}

/// Persisted sweep configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Remote to clean up
    pub origin: String,
    /// Branch considered master
    pub master: String,
    /// Branch short names never offered for deletion
    pub skip: Vec<String>,
    /// Scan tuning
    pub scan: ScanSettings,
    /// Deletion tuning
    pub delete: DeleteSettings,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            master: DEFAULT_MASTER.to_string(),
            skip: Vec::new(),
            scan: ScanSettings::default(),
            delete: DeleteSettings::default(),
        }
    }
}

impl SweepConfig {
    /// Apply command-line overrides
    ///
    /// `skip` replaces the configured list when given, matching how a flag
    /// is expected to win over a file.
    #[must_use]
    pub fn with_overrides(
        mut self,
        origin: Option<&str>,
        master: Option<&str>,
        skip: Option<&str>,
    ) -> Self {
        if let Some(origin) = origin {
            self.origin = origin.to_string();
        }
        if let Some(master) = master {
            self.master = master.to_string();
        }
        if let Some(skip) = skip {
            self.skip = parse_skip_list(skip).into_iter().collect();
            self.skip.sort();
        }
        self
    }

    /// Remote, master, and skip set for a scan
    pub fn target(&self) -> SweepTarget {
        SweepTarget {
            remote: self.origin.clone(),
            master: self.master.clone(),
            skip: self.skip.iter().cloned().collect(),
        }
    }

    /// Scan options derived from the `[scan]` section
    pub const fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_commits: self.scan.max_commits,
            workers: self.scan.workers,
            batch_size: self.scan.batch_size,
            concurrency_threshold: self.scan.concurrency_threshold,
            timeout: Duration::from_secs(self.scan.timeout_secs),
        }
    }

    /// Time allowed for deleting one branch
    pub const fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete.timeout_secs)
    }
}

/// Parse a comma-separated skip list, ignoring blanks and surrounding spaces
pub fn parse_skip_list(input: &str) -> HashSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
