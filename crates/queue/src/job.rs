use std::fmt;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::config::DeliveryConfig;

/// Identifier of a delivery job, generated at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One retryable unit of delivery work wrapping a serialized payload.
///
/// The payload is exactly the value handed to [`DeliveryJob::new`]; the job
/// never derives or rebuilds it. The attempt counter lives in the hosting
/// queue infrastructure, which passes the current count into each dispatch --
/// the job itself carries only the ceiling and the fixed redelivery delay.
#[derive(Debug, Clone)]
pub struct DeliveryJob {
    /// Identifier the queue infrastructure addresses this job by.
    pub id: JobId,
    /// The serialized tree to transmit.
    pub payload: Value,
    /// Dispatch ceiling after which the job is abandoned.
    pub max_attempts: u32,
    /// Fixed delay before a failed job is redelivered.
    pub retry_delay: Duration,
}

impl DeliveryJob {
    /// Wrap a serialized payload for delivery under the given tunables.
    pub fn new(payload: Value, config: &DeliveryConfig) -> Self {
        Self {
            id: JobId::new(),
            payload,
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn job_carries_payload_verbatim() {
        let payload = json!({"text": "hi", "attachments": [{"fallback": "x"}]});
        let job = DeliveryJob::new(payload.clone(), &DeliveryConfig::default());
        assert_eq!(job.payload, payload);
    }

    #[test]
    fn job_takes_tunables_from_config() {
        let config = DeliveryConfig {
            max_attempts: 3,
            retry_delay: Duration::from_secs(7),
        };
        let job = DeliveryJob::new(json!({}), &config);
        assert_eq!(job.max_attempts, 3);
        assert_eq!(job.retry_delay, Duration::from_secs(7));
    }

    #[test]
    fn job_ids_are_unique() {
        let config = DeliveryConfig::default();
        let a = DeliveryJob::new(json!({}), &config);
        let b = DeliveryJob::new(json!({}), &config);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn job_id_display_roundtrip() {
        let id = JobId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36, "uuid text form");
    }
}
