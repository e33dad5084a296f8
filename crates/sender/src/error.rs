use std::time::Duration;

use thiserror::Error;

/// Failure reported by a [`Sender`](crate::Sender).
///
/// The delivery queue treats every variant identically as a transient,
/// retryable failure; the variants exist so logs and the abandoned-delivery
/// hook can say what actually happened. Nothing here ever reaches the caller
/// that submitted the payload.
#[derive(Debug, Error)]
pub enum SenderError {
    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The endpoint did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered but refused the payload.
    #[error("endpoint rejected payload: {0}")]
    Rejected(String),

    /// The endpoint rejected the request due to rate limiting.
    #[error("rate limited")]
    RateLimited,

    /// The payload could not be serialized for transmission.
    #[error("serialization error: {0}")]
    Serialization(String),
}
