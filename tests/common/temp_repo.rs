//! Real git repositories for integration tests
//!
//! Built with the `git` CLI: a bare repository acts as `origin` and a clone
//! of it is the working repository the scanner reads.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working repository with a bare `origin`, both in a temp directory
pub struct TempGitRepo {
    dir: TempDir,
    work: PathBuf,
    remote: PathBuf,
    counter: std::cell::Cell<u32>,
}

impl TempGitRepo {
    /// Create `origin` (bare) and a working repo with one commit on master
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let remote = dir.path().join("origin.git");
        let work = dir.path().join("work");

        git(dir.path(), &["init", "--bare", "-b", "master", "origin.git"]);
        git(dir.path(), &["init", "-b", "master", "work"]);

        let repo = Self {
            dir,
            work,
            remote,
            counter: std::cell::Cell::new(0),
        };
        repo.git(&["remote", "add", "origin", repo.remote.to_str().unwrap()]);
        repo.commit("initial commit");
        repo.git(&["push", "-u", "origin", "master"]);
        repo
    }

    /// Working tree path
    pub fn path(&self) -> &Path {
        &self.work
    }

    /// Bare remote path
    pub fn remote_path(&self) -> &Path {
        &self.remote
    }

    /// Scratch directory next to the repositories (not a git repo)
    pub fn scratch_dir(&self) -> PathBuf {
        let scratch = self.dir.path().join("scratch");
        std::fs::create_dir_all(&scratch).expect("failed to create scratch dir");
        scratch
    }

    /// Run git in the working tree and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        git(&self.work, args)
    }

    /// Commit a new file on the current branch and return its hash
    pub fn commit(&self, message: &str) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        let file = format!("file-{n}.txt");
        std::fs::write(self.work.join(&file), format!("{message}\n")).expect("failed to write file");
        self.git(&["add", &file]);
        self.git(&["commit", "-m", message]);
        self.head()
    }

    /// Hash of HEAD
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Create `name` from master with `commits` commits and push it
    pub fn push_branch(&self, name: &str, commits: usize) {
        self.git(&["checkout", "-q", "-b", name, "master"]);
        for i in 0..commits {
            self.commit(&format!("{name} change {i}"));
        }
        self.git(&["push", "-q", "origin", name]);
        self.git(&["checkout", "-q", "master"]);
    }

    /// Merge `name` into master with a merge commit and push master
    pub fn merge_into_master(&self, name: &str) {
        self.git(&["checkout", "-q", "master"]);
        self.git(&["merge", "-q", "--no-ff", "-m", &format!("Merge {name}"), name]);
        self.git(&["push", "-q", "origin", "master"]);
    }

    /// Create, push, and merge a branch in one go
    pub fn merged_branch(&self, name: &str) {
        self.push_branch(name, 1);
        self.merge_into_master(name);
    }

    /// Branch names present on the bare remote
    pub fn remote_branches(&self) -> Vec<String> {
        git(
            &self.remote,
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
        )
        .lines()
        .map(String::from)
        .collect()
    }
}

impl Default for TempGitRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// Run git in `dir` with a fixed identity and no user config
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=master"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
