//! The worker pool: shared work queue, fan-out, fan-in
//!
//! All links are pushed into a single shared queue up front. Every worker
//! runs its own loop: pop a link, run the blocking check on the blocking
//! thread pool, send the result back over a channel, repeat until the queue
//! is observed empty. Distribution is greedy and self-balancing: a slow
//! worker simply pops fewer items. There is no static partitioning.

use crate::crawler::client::PageClient;
use crate::crawler::worker::{CheckResult, CheckWorker};
use crate::RakeError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// A shared queue of pending links
///
/// Pops are non-blocking: `None` means the queue was observed empty, which
/// is a worker's normal signal to stop, not an error. Each link is delivered
/// to at most one worker.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<String>>,
}

impl WorkQueue {
    pub fn new(links: Vec<String>) -> Self {
        Self {
            items: Mutex::new(VecDeque::from(links)),
        }
    }

    /// Removes and returns the next pending link, if any
    pub fn pop(&self) -> Option<String> {
        self.items.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }
}

/// A fixed-size pool of check workers
///
/// Workers (and their clients) are constructed eagerly when the pool is
/// built and live until [`WorkerPool::shutdown`]. Failing to build any one
/// worker fails the whole pool.
pub struct WorkerPool {
    workers: Vec<CheckWorker>,
}

impl WorkerPool {
    /// Eagerly constructs exactly `worker_count` workers
    ///
    /// Client construction happens on the blocking pool, next to the
    /// blocking I/O it will serve.
    pub async fn new(
        worker_count: u32,
        delay: Duration,
        fetch_timeout: Duration,
    ) -> Result<Self, RakeError> {
        let workers = tokio::task::spawn_blocking(move || {
            let mut workers = Vec::with_capacity(worker_count as usize);
            for id in 1..=worker_count as usize {
                let client = PageClient::new(fetch_timeout)?;
                workers.push(CheckWorker::new(id, client, delay));
            }
            Ok::<_, RakeError>(workers)
        })
        .await??;

        tracing::info!("Worker pool ready with {} workers", workers.len());
        Ok(Self { workers })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Checks every link, distributing work greedily across the pool
    ///
    /// Returns exactly one result per input link, in completion order (the
    /// workers race; no ordering is guaranteed). Does not return until every
    /// worker loop has exited, i.e. the queue has drained.
    pub async fn run_checks(&mut self, links: Vec<String>) -> Result<Vec<CheckResult>, RakeError> {
        let expected = links.len();
        let queue = Arc::new(WorkQueue::new(links));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut handles = Vec::with_capacity(self.workers.len());
        for worker in self.workers.drain(..) {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            handles.push(tokio::spawn(worker_loop(worker, queue, tx)));
        }
        drop(tx);

        // Reclaim every worker; its loop ends when the queue drains
        for handle in handles {
            if let Some(worker) = handle.await? {
                self.workers.push(worker);
            }
        }

        let mut results = Vec::with_capacity(expected);
        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        tracing::debug!("Queue drained, {} results collected", results.len());
        Ok(results)
    }

    /// Releases every worker unconditionally
    ///
    /// A failed release is logged and skipped so the remaining workers still
    /// get torn down. Safe to call more than once.
    pub fn shutdown(&mut self) {
        for worker in self.workers.drain(..) {
            let id = worker.id();
            if let Err(e) = worker.release() {
                tracing::warn!("Failed to release worker {}: {}", id, e);
            }
        }
    }
}

/// One worker's consumption loop: pop, check on the blocking pool, report
///
/// Returns the worker so the pool can reclaim it for teardown. Returns
/// `None` only if a check panicked and took the worker with it.
async fn worker_loop(
    mut worker: CheckWorker,
    queue: Arc<WorkQueue>,
    tx: mpsc::UnboundedSender<CheckResult>,
) -> Option<CheckWorker> {
    while let Some(url) = queue.pop() {
        // The worker moves into the blocking closure and comes back out with
        // the result; its client never crosses a thread boundary mid-check.
        let outcome = tokio::task::spawn_blocking(move || {
            let result = worker.check(url);
            (worker, result)
        })
        .await;

        match outcome {
            Ok((reclaimed, result)) => {
                worker = reclaimed;
                // A closed receiver means the pool gave up on us
                if tx.send(result).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Check task panicked, worker lost: {}", e);
                return None;
            }
        }
    }

    Some(worker)
}
