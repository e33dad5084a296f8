use std::time::Duration;

use courier_sender::SenderError;
use thiserror::Error;

/// Errors specific to the webhook sender.
///
/// These are internal errors that get converted into [`SenderError`] at the
/// capability boundary. The delivery queue retries all of them identically;
/// the distinction exists for logs and the abandoned-delivery hook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, best effort.
        body: String,
    },

    /// The endpoint returned HTTP 429 (Too Many Requests).
    #[error("rate limited by endpoint")]
    RateLimited,
}

impl From<WebhookError> for SenderError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::Http(e) => SenderError::Connection(e.to_string()),
            WebhookError::Timeout(timeout) => SenderError::Timeout(timeout),
            WebhookError::Status { status, body } => {
                SenderError::Rejected(format!("HTTP {status}: {body}"))
            }
            WebhookError::RateLimited => SenderError::RateLimited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_rejected() {
        let sender_err: SenderError = WebhookError::Status {
            status: 500,
            body: "internal".into(),
        }
        .into();
        assert!(matches!(sender_err, SenderError::Rejected(_)));
        assert_eq!(sender_err.to_string(), "endpoint rejected payload: HTTP 500: internal");
    }

    #[test]
    fn rate_limited_maps_to_rate_limited() {
        let sender_err: SenderError = WebhookError::RateLimited.into();
        assert!(matches!(sender_err, SenderError::RateLimited));
    }

    #[test]
    fn timeout_maps_to_timeout() {
        let sender_err: SenderError = WebhookError::Timeout(Duration::from_secs(30)).into();
        assert!(matches!(sender_err, SenderError::Timeout(_)));
    }
}
