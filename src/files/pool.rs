//! Fixed-size worker pool shared by the presign and download stages.
//!
//! Every item is queued before the workers start. Workers pull from one shared
//! receiver, so an item is handed out exactly once, and push one [`Outcome`]
//! per item into a channel sized to the batch, so a worker never blocks on a
//! slow collector.

use crate::error::{Error, Result};
use crate::types::FileId;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;

use super::File;

/// Anything the pool can process: it only needs a stable identity.
pub(crate) trait BatchItem {
    fn item_id(&self) -> FileId;
}

impl BatchItem for File {
    fn item_id(&self) -> FileId {
        self.id
    }
}

/// Result of applying the stage operation to one item.
#[derive(Debug)]
pub(crate) struct Outcome<R> {
    pub(crate) id: FileId,
    pub(crate) result: Result<R>,
}

/// Bounded-parallelism executor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// A worker count of 0 is treated as 1.
    pub(crate) fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Workers actually spawned for a batch of `len` items.
    pub(crate) fn workers_for(&self, len: usize) -> usize {
        self.workers.min(len)
    }

    /// Apply `op` to every item with at most `workers` running at once.
    ///
    /// Returns exactly one outcome per item, in completion order. An item whose
    /// worker died before reporting is returned as [`Error::WorkerLost`].
    pub(crate) async fn run<T, R, F, Fut>(&self, items: Vec<T>, op: F) -> Vec<Outcome<R>>
    where
        T: BatchItem + Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        let submitted: Vec<FileId> = items.iter().map(BatchItem::item_id).collect();

        let (job_tx, job_rx) = mpsc::unbounded_channel::<T>();
        for item in items {
            let id = item.item_id();
            if job_tx.send(item).is_err() {
                tracing::error!(file_id = %id, "work queue closed while enqueueing");
            }
        }
        // Closing the sender lets workers stop once the queue is drained
        drop(job_tx);

        let jobs = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<Outcome<R>>(total);
        let op = Arc::new(op);
        let workers = self.workers_for(total);

        tracing::debug!(workers, items = total, "starting worker pool");

        let mut set = JoinSet::new();
        for _ in 0..workers {
            let jobs = Arc::clone(&jobs);
            let result_tx = result_tx.clone();
            let op = Arc::clone(&op);
            set.spawn(async move {
                loop {
                    let next = jobs.lock().await.recv().await;
                    let Some(item) = next else { break };
                    let id = item.item_id();
                    let result = op(item).await;
                    if result_tx.send(Outcome { id, result }).await.is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        let mut outcomes = Vec::with_capacity(total);
        while outcomes.len() < total {
            match result_rx.recv().await {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }

        while let Some(joined) = set.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "batch worker panicked");
            }
        }

        if outcomes.len() < total {
            let reported: HashSet<FileId> = outcomes.iter().map(|o| o.id).collect();
            for id in submitted {
                if !reported.contains(&id) {
                    tracing::warn!(file_id = %id, "no outcome reported for item");
                    outcomes.push(Outcome {
                        id,
                        result: Err(Error::WorkerLost),
                    });
                }
            }
        }

        outcomes
    }
}
