use courier_sender::{Sender, SenderError};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::WebhookConfig;
use crate::error::WebhookError;

/// Sender that posts serialized payloads as JSON to a webhook endpoint.
///
/// Implements the [`Sender`] trait so it can be injected into the delivery
/// queue's dispatcher. Endpoint-level defaults (channel, username, icon) are
/// merged into each payload for keys the message left unset.
pub struct WebhookSender {
    config: WebhookConfig,
    client: Client,
}

impl WebhookSender {
    /// Create a new webhook sender with the given configuration.
    ///
    /// Uses a default `reqwest::Client` with the configured timeout.
    pub fn new(config: WebhookConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new webhook sender with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool across senders.
    pub fn with_client(config: WebhookConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Merge endpoint-level defaults into the payload.
    ///
    /// Only keys the payload leaves unset (absent or `null`) are filled; the
    /// icon default is skipped when the payload already carries either icon
    /// form.
    fn apply_defaults(&self, payload: &Value) -> Value {
        let mut merged = payload.clone();
        let Some(map) = merged.as_object_mut() else {
            return merged;
        };

        if let Some(channel) = &self.config.default_channel
            && is_unset(map.get("channel"))
        {
            map.insert("channel".to_owned(), Value::from(channel.clone()));
        }
        if let Some(username) = &self.config.default_username
            && is_unset(map.get("username"))
        {
            map.insert("username".to_owned(), Value::from(username.clone()));
        }
        if let Some(icon) = &self.config.default_icon
            && is_unset(map.get("icon_url"))
            && is_unset(map.get("icon_emoji"))
        {
            map.insert(icon_key(icon).to_owned(), Value::from(icon.clone()));
        }

        merged
    }
}

fn is_unset(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Payload key an icon value belongs under. Emoji icons are written
/// `:name:`; everything else is treated as an image URL.
fn icon_key(icon: &str) -> &'static str {
    if icon.len() > 2 && icon.starts_with(':') && icon.ends_with(':') {
        "icon_emoji"
    } else {
        "icon_url"
    }
}

impl Sender for WebhookSender {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "webhook"
    }

    #[instrument(skip(self, payload), fields(sender = "webhook"))]
    async fn send(&self, payload: &Value) -> Result<(), SenderError> {
        if !self.config.enabled {
            debug!("webhook delivery disabled, acknowledging without sending");
            return Ok(());
        }

        let body = self.apply_defaults(payload);

        debug!("posting payload to webhook endpoint");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WebhookError::Timeout(self.config.timeout)
                } else {
                    WebhookError::Http(e)
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("webhook endpoint rate limit hit");
            return Err(WebhookError::RateLimited.into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }
}
