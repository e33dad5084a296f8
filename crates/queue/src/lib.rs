//! Bounded-retry asynchronous delivery queue for Courier payloads.
//!
//! A [`DeliveryJob`] wraps one already-serialized payload. At each dispatch
//! the [`Dispatcher`] reads the ambient attempt count from the hosting queue
//! infrastructure and either abandons the job (ceiling reached, no send),
//! delivers it (success, job deleted), or schedules a retry after the fixed
//! delay. Delivery failure is never fatal to the submitting caller;
//! exhaustion is surfaced only through an optional [`AbandonSink`].
//!
//! The queue infrastructure itself sits behind the narrow [`JobQueue`]
//! trait; [`MemoryQueue`] is an in-process tokio implementation suitable for
//! embedding and tests.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use courier_queue::{AbandonLog, DeliveryConfig, DeliveryJob, Dispatcher, JobQueue, MemoryQueue};
//! use courier_sender::{Sender, SenderError};
//!
//! struct Noop;
//!
//! impl Sender for Noop {
//!     fn name(&self) -> &str {
//!         "noop"
//!     }
//!
//!     async fn send(&self, _payload: &serde_json::Value) -> Result<(), SenderError> {
//!         Ok(())
//!     }
//! }
//!
//! # async fn demo() {
//! let log = Arc::new(AbandonLog::new());
//! let dispatcher = Dispatcher::new(Arc::new(Noop)).with_abandon_sink(log.clone());
//! let queue = MemoryQueue::start(dispatcher);
//!
//! let config = DeliveryConfig::default();
//! let job = DeliveryJob::new(serde_json::json!({"text": "hi"}), &config);
//! queue.enqueue(job, Duration::ZERO).await;
//! # }
//! ```

pub mod abandoned;
pub mod config;
pub mod dispatch;
pub mod job;
pub mod queue;

pub use abandoned::{AbandonLog, AbandonSink, AbandonedDelivery};
pub use config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, DeliveryConfig};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use job::{DeliveryJob, JobId};
pub use queue::{JobQueue, MemoryQueue};
