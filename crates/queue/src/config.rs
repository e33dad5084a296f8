use std::time::Duration;

/// Default retry ceiling for a delivery job.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default fixed delay before a failed job becomes eligible again.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(120);

/// Tunables of the delivery queue.
///
/// Delivery to a webhook endpoint is best-effort and idempotent from the
/// receiver's perspective, so the policy is deliberately simple: a fixed
/// delay between attempts and a hard ceiling, with no backoff curve.
///
/// # Examples
///
/// ```
/// use courier_queue::DeliveryConfig;
///
/// let config = DeliveryConfig::default();
/// assert_eq!(config.max_attempts, 10);
/// assert_eq!(config.retry_delay.as_secs(), 120);
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Number of dispatches after which a job is abandoned without a further
    /// send.
    pub max_attempts: u32,
    /// Fixed delay before a failed job is redelivered.
    pub retry_delay: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = DeliveryConfig::default();
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.retry_delay, DEFAULT_RETRY_DELAY);
    }

    #[test]
    fn config_custom_values() {
        let config = DeliveryConfig {
            max_attempts: 3,
            retry_delay: Duration::from_secs(30),
        };
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(30));
    }
}
