//! Cleanup engine for merged branches
//!
//! Three-phase pattern:
//! 1. Gather - scan for merged branches (effectful, bounded)
//! 2. Plan - create `CleanupPlan` (pure, testable)
//! 3. Execute - delete branches on the remote (effectful)

mod execute;
mod plan;

pub use execute::{CleanupResult, NoopProgress, ProgressCallback, execute_cleanup};
pub use plan::{CleanupPlan, DeleteStep, create_cleanup_plan};
