//! Cancellation shared by the producer, workers, and the sequential loop

use crate::error::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const TIMED_OUT: u8 = 2;

#[derive(Debug, Default)]
struct CancelState {
    reason: AtomicU8,
    deadline_ms: AtomicU64,
}

/// Cloneable cancellation signal for one scan
///
/// Checked at every commit (sequential) or batch (concurrent) boundary. The
/// first reason recorded wins, so a deadline firing after an explicit cancel
/// still reports [`Error::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    /// Create a token that has not been triggered
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.trigger(CANCELLED);
    }

    /// Mark the scan as having run past its deadline
    pub fn expire(&self, after: Duration) {
        let millis = u64::try_from(after.as_millis()).unwrap_or(u64::MAX);
        self.state.deadline_ms.store(millis, Ordering::Release);
        self.trigger(TIMED_OUT);
    }

    fn trigger(&self, reason: u8) {
        // Release pairs with the Acquire in is_cancelled()
        let _ = self.state.reason.compare_exchange(
            RUNNING,
            reason,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Whether cancellation (or the deadline) has been triggered
    pub fn is_cancelled(&self) -> bool {
        self.state.reason.load(Ordering::Acquire) != RUNNING
    }

    /// `Ok(())` while running, otherwise the matching error
    pub fn check(&self) -> Result<()> {
        match self.state.reason.load(Ordering::Acquire) {
            RUNNING => Ok(()),
            TIMED_OUT => Err(Error::TimedOut(Duration::from_millis(
                self.state.deadline_ms.load(Ordering::Acquire),
            ))),
            _ => Err(Error::Cancelled),
        }
    }

    /// Expire this token after `timeout` unless the guard is dropped first
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm_deadline(&self, timeout: Duration) -> DeadlineGuard {
        let token = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            debug!(?timeout, "scan deadline reached");
            token.expire(timeout);
        });
        DeadlineGuard { handle }
    }
}

/// Aborts the deadline timer when dropped
#[derive(Debug)]
pub struct DeadlineGuard {
    handle: JoinHandle<()>,
}

impl Drop for DeadlineGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
