use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use courier_message::Message;
use courier_queue::{DeliveryConfig, DeliveryJob, Dispatcher, JobId, JobQueue, MemoryQueue};
use courier_webhook::{WebhookConfig, WebhookSender};

/// Submission facade for the delivery pipeline.
///
/// Holds the injected queue infrastructure and the delivery tunables; every
/// collaborator arrives through a constructor, never through ambient lookup.
/// Submission serializes the message, wraps it in a fresh [`DeliveryJob`]
/// with attempt count zero, and enqueues it immediately -- it never blocks on
/// network I/O and never fails from the caller's point of view, whatever
/// later happens to delivery.
pub struct Gateway {
    queue: Arc<dyn JobQueue>,
    config: DeliveryConfig,
}

impl Gateway {
    /// Create a gateway over an already-running queue infrastructure.
    pub fn new(queue: Arc<dyn JobQueue>, config: DeliveryConfig) -> Self {
        Self { queue, config }
    }

    /// Create a gateway backed by an in-process [`MemoryQueue`] running the
    /// given dispatcher.
    ///
    /// Must be called from within a tokio runtime; the broker's worker loop
    /// is spawned immediately.
    pub fn with_memory_queue(dispatcher: Dispatcher, config: DeliveryConfig) -> Self {
        Self::new(MemoryQueue::start(dispatcher), config)
    }

    /// Create a gateway delivering through an HTTP webhook sender on an
    /// in-process queue.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_webhook(webhook: WebhookConfig, config: DeliveryConfig) -> Self {
        let sender = Arc::new(WebhookSender::new(webhook));
        Self::with_memory_queue(Dispatcher::new(sender), config)
    }

    /// The delivery tunables applied to submitted messages.
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Serialize `message` and enqueue it for delivery, returning the id of
    /// the freshly created job.
    #[instrument(skip(self, message))]
    pub async fn submit(&self, message: &Message) -> JobId {
        let payload = message.to_value();
        let job = DeliveryJob::new(payload, &self.config);
        let id = job.id;
        debug!(job_id = %id, "submitting message for delivery");
        self.queue.enqueue(job, Duration::ZERO).await;
        id
    }
}
