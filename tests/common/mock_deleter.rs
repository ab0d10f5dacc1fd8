//! Mock branch deleter for testing

#![allow(dead_code)]

use async_trait::async_trait;
use gitsweeper::delete::{BranchDeleter, DeleteOutcome};
use gitsweeper::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Call record for `delete_remote_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCall {
    pub remote: String,
    pub branch: String,
}

/// Mock deleter with call tracking and per-branch error injection
///
/// Branches listed with [`MockDeleter::set_already_gone`] report
/// [`DeleteOutcome::AlreadyGone`]; everything else is deleted.
#[derive(Default)]
pub struct MockDeleter {
    already_gone: Mutex<HashSet<String>>,
    // Call tracking
    delete_calls: Mutex<Vec<DeleteCall>>,
    // Error injection
    error_on_branch: Mutex<HashMap<String, String>>,
}

impl MockDeleter {
    /// Create a deleter that succeeds for every branch
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `branch` as already deleted
    pub fn set_already_gone(&self, branch: &str) {
        self.already_gone
            .lock()
            .unwrap()
            .insert(branch.to_string());
    }

    /// Make deleting `branch` fail with `msg`
    pub fn fail_branch(&self, branch: &str, msg: &str) {
        self.error_on_branch
            .lock()
            .unwrap()
            .insert(branch.to_string(), msg.to_string());
    }

    /// Get all recorded calls
    pub fn get_delete_calls(&self) -> Vec<DeleteCall> {
        self.delete_calls.lock().unwrap().clone()
    }

    /// Assert that branches were deleted in this order
    pub fn assert_deleted_in_order(&self, expected: &[&str]) {
        let calls: Vec<String> = self
            .get_delete_calls()
            .into_iter()
            .map(|c| c.branch)
            .collect();
        assert_eq!(calls, expected, "unexpected deletion order");
    }
}

#[async_trait]
impl BranchDeleter for MockDeleter {
    async fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<DeleteOutcome> {
        self.delete_calls.lock().unwrap().push(DeleteCall {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });

        if let Some(msg) = self.error_on_branch.lock().unwrap().get(branch) {
            return Err(Error::Delete {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message: msg.clone(),
            });
        }

        if self.already_gone.lock().unwrap().contains(branch) {
            return Ok(DeleteOutcome::AlreadyGone);
        }
        Ok(DeleteOutcome::Deleted)
    }
}
