use std::sync::Arc;

use tracing::{debug, instrument, warn};

use courier_sender::DynSender;

use crate::abandoned::AbandonSink;
use crate::job::DeliveryJob;
use crate::queue::JobQueue;

/// Terminal result of one dispatch of a delivery job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The payload reached the endpoint and the job was deleted.
    Delivered,
    /// The send failed and the job was re-enqueued after its retry delay.
    Retrying,
    /// The attempt ceiling was reached; the job was deleted without a send.
    Abandoned,
}

/// Policy invoked at each dispatch of a delivery job.
///
/// Holds the injected sender and the optional abandoned-delivery sink. The
/// hosting queue supplies the current attempt count; the policy's only
/// effects go back through the narrow [`JobQueue`] interface. Failures of
/// any kind are treated identically as transient -- the policy never inspects
/// the error beyond logging it.
pub struct Dispatcher {
    sender: Arc<dyn DynSender>,
    abandon_sink: Option<Arc<dyn AbandonSink>>,
}

impl Dispatcher {
    /// Create a dispatcher around the injected sender.
    pub fn new(sender: Arc<dyn DynSender>) -> Self {
        Self {
            sender,
            abandon_sink: None,
        }
    }

    /// Install a sink notified when a job is abandoned.
    #[must_use]
    pub fn with_abandon_sink(mut self, sink: Arc<dyn AbandonSink>) -> Self {
        self.abandon_sink = Some(sink);
        self
    }

    /// Run one dispatch of `job`.
    ///
    /// `attempts` is the number of dispatches the queue infrastructure has
    /// recorded before this one. At or past the job's ceiling the job is
    /// deleted without a send; otherwise exactly one send is attempted, and
    /// the job is deleted on success or re-enqueued with its fixed retry
    /// delay on any failure.
    #[instrument(skip(self, job, queue), fields(job_id = %job.id, attempts))]
    pub async fn dispatch(
        &self,
        job: &DeliveryJob,
        attempts: u32,
        queue: &dyn JobQueue,
    ) -> DispatchOutcome {
        if attempts >= job.max_attempts {
            warn!(
                max_attempts = job.max_attempts,
                "retry ceiling reached, abandoning delivery"
            );
            queue.delete(job.id).await;
            if let Some(sink) = &self.abandon_sink {
                sink.notify(job.payload.clone(), attempts).await;
            }
            return DispatchOutcome::Abandoned;
        }

        debug!(sender = self.sender.name(), "attempting delivery");
        match self.sender.send(&job.payload).await {
            Ok(()) => {
                debug!("payload delivered");
                queue.delete(job.id).await;
                DispatchOutcome::Delivered
            }
            Err(err) => {
                warn!(
                    error = %err,
                    delay_secs = job.retry_delay.as_secs(),
                    "delivery failed, scheduling retry"
                );
                queue.enqueue(job.clone(), job.retry_delay).await;
                DispatchOutcome::Retrying
            }
        }
    }
}
