use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::dispatch::Dispatcher;
use crate::job::{DeliveryJob, JobId};

/// Narrow interface onto the queue infrastructure hosting delivery jobs.
///
/// `enqueue` makes a job eligible for dispatch once `delay` has elapsed;
/// `delete` acknowledges the job and permanently removes it. Both are
/// fire-and-forget: implementations absorb their own transport failures so
/// that submission never fails from the caller's point of view. The
/// infrastructure also owns the ambient per-job attempt counter it hands to
/// the dispatch policy.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Make `job` eligible for dispatch after `delay`.
    async fn enqueue(&self, job: DeliveryJob, delay: Duration);

    /// Acknowledge and permanently remove the job.
    async fn delete(&self, id: JobId);
}

/// In-process broker dispatching delivery jobs on the tokio runtime.
///
/// The broker increments a per-job attempt counter on every dispatch and
/// hands the pre-increment value to the [`Dispatcher`]. Each job has at most
/// one dispatch in flight; a failed job re-enters the queue only after its
/// retry delay has elapsed, so attempts are strictly sequential per job
/// while distinct jobs dispatch concurrently.
///
/// Dropping the last handle stops the worker loop. Durable brokering is the
/// hosting application's concern; this implementation is suitable for
/// embedding and for tests.
pub struct MemoryQueue {
    tx: mpsc::UnboundedSender<DeliveryJob>,
    attempts: DashMap<JobId, u32>,
}

impl MemoryQueue {
    /// Start a broker whose dispatches run through `dispatcher`.
    pub fn start(dispatcher: Dispatcher) -> Arc<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<DeliveryJob>();
        let queue = Arc::new(Self {
            tx,
            attempts: DashMap::new(),
        });
        let weak: Weak<MemoryQueue> = Arc::downgrade(&queue);
        let dispatcher = Arc::new(dispatcher);

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let Some(queue) = weak.upgrade() else { break };
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    let attempts = queue.begin_dispatch(job.id);
                    dispatcher.dispatch(&job, attempts, queue.as_ref()).await;
                });
            }
            debug!("memory queue worker stopped");
        });

        queue
    }

    /// Record a dispatch: returns the attempt count before this dispatch and
    /// increments the ambient counter.
    fn begin_dispatch(&self, id: JobId) -> u32 {
        let mut entry = self.attempts.entry(id).or_insert(0);
        let current = *entry;
        *entry += 1;
        current
    }

    /// Number of jobs with live dispatch state (enqueued or retrying, not
    /// yet deleted).
    pub fn tracked_jobs(&self) -> usize {
        self.attempts.len()
    }
}

#[async_trait]
impl JobQueue for MemoryQueue {
    async fn enqueue(&self, job: DeliveryJob, delay: Duration) {
        if delay.is_zero() {
            if self.tx.send(job).is_err() {
                warn!("memory queue worker gone, dropping job");
            }
            return;
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(job).is_err() {
                warn!("memory queue worker gone, dropping redelivered job");
            }
        });
    }

    async fn delete(&self, id: JobId) {
        self.attempts.remove(&id);
    }
}
