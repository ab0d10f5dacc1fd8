//! Batched producer/worker history scan
//!
//! One blocking producer walks master's history and publishes fixed-size
//! batches on a bounded queue. A small pool of workers pulls batches, matches
//! hashes against the shared [`CandidateIndex`], and keeps a private
//! [`FoundSet`]. The collector merges, deduplicates, and sorts.
//!
//! A worker stops once its *own* found set is complete. Workers do not share
//! completion state, so after every branch has been found globally the others
//! keep draining batches until the producer hits the end of history or the
//! commit ceiling. The producer does stop early once every worker has exited,
//! because the queue's receiving side is gone.

use crate::error::{Error, Result};
use crate::repo::HistoryWalker;
use crate::scan::cancel::CancelToken;
use crate::scan::index::{CandidateIndex, FoundSet};
use crate::scan::observer::ScanObserver;
use crate::scan::{ScanOptions, ScanOutcome, Strategy, Termination};
use crate::types::{BranchHead, CommitRef};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// A run of consecutive commits from master's history
#[derive(Debug)]
struct CommitBatch {
    /// Position of the first commit in the walk
    start_index: usize,
    commits: Vec<CommitRef>,
}

type BatchReceiver = Arc<Mutex<mpsc::Receiver<CommitBatch>>>;

/// What the producer saw while walking
#[derive(Debug, Default)]
struct ProducerStats {
    commits: usize,
    batches: usize,
    truncated: bool,
}

/// Number of workers to run: the configured count capped by available cores
pub fn worker_count(configured: usize) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    configured.min(cores).max(1)
}

/// Scan master's history with a producer and a pool of workers
///
/// Same contract as [`scan_sequential`](crate::scan::scan_sequential): same
/// commit ceiling, sorted and deduplicated output. Must run inside a tokio
/// multi-thread runtime.
pub async fn scan_concurrent(
    walker: Arc<dyn HistoryWalker>,
    master_head: CommitRef,
    candidates: &[BranchHead],
    options: &ScanOptions,
    observer: Arc<dyn ScanObserver>,
    cancel: &CancelToken,
) -> Result<ScanOutcome> {
    let index = Arc::new(CandidateIndex::build(candidates));
    if index.is_empty() {
        return Ok(ScanOutcome::empty(Strategy::Concurrent));
    }

    let workers = worker_count(options.workers);
    let batch_size = options.batch_size.max(1);
    let (tx, rx) = mpsc::channel::<CommitBatch>(workers * 2);
    let rx: BatchReceiver = Arc::new(Mutex::new(rx));

    debug!(workers, batch_size, candidates = index.candidate_count(), "starting concurrent scan");

    let mut handles = Vec::with_capacity(workers);
    for worker_id in 0..workers {
        let rx = Arc::clone(&rx);
        let index = Arc::clone(&index);
        let observer = Arc::clone(&observer);
        let cancel = cancel.clone();
        handles.push(tokio::spawn(async move {
            run_worker(worker_id, rx, &index, observer.as_ref(), &cancel).await
        }));
    }
    // Workers own the only receivers, so the producer notices when they all stop
    drop(rx);

    let producer = {
        let cancel = cancel.clone();
        let max_commits = options.max_commits;
        tokio::task::spawn_blocking(move || {
            produce_batches(walker.as_ref(), master_head, &tx, max_commits, batch_size, &cancel)
        })
    };

    let produced = producer
        .await
        .map_err(|e| Error::Internal(format!("history producer failed: {e}")));

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for handle in handles {
        let names = handle
            .await
            .map_err(|e| Error::Internal(format!("scan worker failed: {e}")))?;
        for name in names {
            if seen.insert(name.clone()) {
                merged.push(name);
            }
        }
    }

    cancel.check()?;
    let stats = produced??;

    let termination = if stats.truncated {
        observer.truncated(options.max_commits);
        Termination::Truncated
    } else if merged.len() >= index.candidate_count() {
        Termination::AllFound
    } else {
        Termination::Exhausted
    };

    debug!(
        commits = stats.commits,
        batches = stats.batches,
        merged = merged.len(),
        "concurrent scan finished"
    );

    Ok(ScanOutcome::new(
        merged,
        termination,
        stats.commits,
        Strategy::Concurrent,
    ))
}

/// Walk history and publish batches until done, truncated, or cancelled
fn produce_batches(
    walker: &dyn HistoryWalker,
    master_head: CommitRef,
    tx: &mpsc::Sender<CommitBatch>,
    max_commits: usize,
    batch_size: usize,
    cancel: &CancelToken,
) -> Result<ProducerStats> {
    let mut stats = ProducerStats::default();
    let mut batch = Vec::with_capacity(batch_size);
    let mut start_index = 0;
    let mut consumers_gone = false;

    walker.walk(master_head, &mut |commit| {
        if cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        if stats.commits >= max_commits {
            stats.truncated = true;
            return ControlFlow::Break(());
        }
        stats.commits += 1;
        batch.push(commit);

        if batch.len() >= batch_size {
            let commits = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
            // Blocks while the queue is full
            if tx.blocking_send(CommitBatch { start_index, commits }).is_err() {
                consumers_gone = true;
                return ControlFlow::Break(());
            }
            stats.batches += 1;
            start_index = stats.commits;
        }
        ControlFlow::Continue(())
    })?;

    if !batch.is_empty()
        && !consumers_gone
        && !cancel.is_cancelled()
        && tx
            .blocking_send(CommitBatch {
                start_index,
                commits: batch,
            })
            .is_ok()
    {
        stats.batches += 1;
    }

    Ok(stats)
}

/// Consume batches until the queue closes, the scan is cancelled, or this
/// worker has seen every candidate
async fn run_worker(
    worker_id: usize,
    rx: BatchReceiver,
    index: &CandidateIndex,
    observer: &dyn ScanObserver,
    cancel: &CancelToken,
) -> Vec<String> {
    let mut found = FoundSet::default();

    loop {
        let next = rx.lock().await.recv().await;
        let Some(batch) = next else {
            break;
        };
        if cancel.is_cancelled() {
            debug!(worker_id, "worker stopping on cancellation");
            break;
        }

        for commit in &batch.commits {
            found.visit(*commit, index, observer);
        }

        if found.is_complete(index) {
            debug!(
                worker_id,
                start_index = batch.start_index,
                "worker found every candidate"
            );
            break;
        }
    }

    found.into_names()
}
