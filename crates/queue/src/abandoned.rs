use std::sync::Mutex;
use std::time::SystemTime;

use async_trait::async_trait;
use serde_json::Value;

/// A payload whose delivery was abandoned after the retry ceiling.
#[derive(Debug)]
pub struct AbandonedDelivery {
    /// The serialized tree that never reached the endpoint.
    pub payload: Value,
    /// Number of dispatches performed before the job was abandoned.
    pub attempts: u32,
    /// Wall-clock time at which delivery was abandoned.
    pub timestamp: SystemTime,
}

/// Observability hook invoked on the abandoned transition.
///
/// Exhaustion of attempts is otherwise silent; installing a sink is the only
/// way for the hosting application to log or alert on permanent delivery
/// failure. Implementations must be `Send + Sync` for use across async
/// tasks.
#[async_trait]
pub trait AbandonSink: Send + Sync {
    /// Record one abandoned delivery.
    async fn notify(&self, payload: Value, attempts: u32);
}

/// In-memory sink collecting abandoned deliveries.
///
/// An append-only buffer guarded by a [`Mutex`]; suitable for tests,
/// development, and hosts that periodically drain it into their own
/// alerting. Because the lock is a standard `Mutex` (not `tokio::sync`),
/// callers must not hold it across `.await` points; the public API ensures
/// this by never returning a guard.
pub struct AbandonLog {
    entries: Mutex<Vec<AbandonedDelivery>>,
}

impl AbandonLog {
    /// Create a new empty log.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_queue::AbandonLog;
    ///
    /// let log = AbandonLog::new();
    /// assert!(log.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append an abandoned delivery, timestamped with the current system
    /// time.
    pub fn push(&self, payload: Value, attempts: u32) {
        let entry = AbandonedDelivery {
            payload,
            attempts,
            timestamp: SystemTime::now(),
        };
        self.entries
            .lock()
            .expect("abandon log mutex poisoned")
            .push(entry);
    }

    /// Drain all entries, returning them. The log is empty afterwards.
    pub fn drain(&self) -> Vec<AbandonedDelivery> {
        let mut guard = self.entries.lock().expect("abandon log mutex poisoned");
        std::mem::take(&mut *guard)
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("abandon log mutex poisoned").len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AbandonLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AbandonSink for AbandonLog {
    async fn notify(&self, payload: Value, attempts: u32) {
        AbandonLog::push(self, payload, attempts);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_log_is_empty() {
        let log = AbandonLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn push_increments_len() {
        let log = AbandonLog::new();
        log.push(json!({"text": "a"}), 10);
        assert_eq!(log.len(), 1);
        log.push(json!({"text": "b"}), 3);
        assert_eq!(log.len(), 2);
        assert!(!log.is_empty());
    }

    #[test]
    fn drain_returns_all_entries_and_empties_log() {
        let log = AbandonLog::new();
        log.push(json!({"n": 1}), 1);
        log.push(json!({"n": 2}), 2);

        let entries = log.drain();
        assert_eq!(entries.len(), 2);
        assert!(log.is_empty());

        assert_eq!(entries[0].payload, json!({"n": 1}));
        assert_eq!(entries[0].attempts, 1);
        assert_eq!(entries[1].attempts, 2);
    }

    #[test]
    fn drain_on_empty_returns_empty_vec() {
        let log = AbandonLog::new();
        assert!(log.drain().is_empty());
    }

    #[test]
    fn entries_have_timestamps() {
        let before = SystemTime::now();
        let log = AbandonLog::new();
        log.push(json!({}), 5);
        let after = SystemTime::now();

        let entries = log.drain();
        assert!(entries[0].timestamp >= before);
        assert!(entries[0].timestamp <= after);
    }

    #[tokio::test]
    async fn sink_impl_delegates_to_push() {
        let log = AbandonLog::default();
        AbandonSink::notify(&log, json!({"text": "x"}), 7).await;
        let entries = log.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attempts, 7);
    }

    #[allow(dead_code)]
    fn _assert_dyn_sink(_: &dyn AbandonSink) {}
}
