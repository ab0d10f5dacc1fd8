//! Cleanup planning - pure functions for creating deletion plans
//!
//! No I/O happens here. The scan result is turned into an ordered list of
//! deletions, making the decision logic easy to unit test.

use crate::refs::split_qualified_name;

/// One branch to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStep {
    /// Qualified name as reported by the scan (`remote/short`)
    pub name: String,
    /// Remote the branch lives on
    pub remote: String,
    /// Branch name on the remote
    pub branch: String,
}

impl std::fmt::Display for DeleteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "delete {} from {}", self.branch, self.remote)
    }
}

/// Deletion plan - the functional core output
///
/// Created by [`create_cleanup_plan`] (pure) and executed by
/// [`execute_cleanup`](crate::cleanup::execute_cleanup) (effectful).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Deletions in the order they will run
    pub steps: Vec<DeleteStep>,
    /// Names dropped because they could not be split into remote and branch
    pub rejected: Vec<String>,
}

impl CleanupPlan {
    /// Whether there is nothing to delete
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of branches to delete
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.steps.len()
    }
}

/// Create a deletion plan from merged branch names (PURE)
///
/// Names without a branch part (no `/`) cannot be deleted and are listed in
/// [`CleanupPlan::rejected`]. Order follows `merged`, which the scan sorts.
#[must_use]
pub fn create_cleanup_plan(merged: &[String]) -> CleanupPlan {
    let mut plan = CleanupPlan::default();

    for name in merged {
        let (remote, branch) = split_qualified_name(name);
        if branch.is_empty() {
            plan.rejected.push(name.clone());
            continue;
        }
        plan.steps.push(DeleteStep {
            name: name.clone(),
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
    }

    plan
}
