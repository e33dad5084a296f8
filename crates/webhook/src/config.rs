use std::time::Duration;

/// Configuration for the webhook sender.
///
/// The endpoint URL embeds a capability secret, so `Debug` redacts it.
#[derive(Clone)]
pub struct WebhookConfig {
    /// Webhook endpoint URL the payload is posted to.
    pub endpoint: String,

    /// Channel applied to payloads that don't carry one.
    pub default_channel: Option<String>,

    /// Username applied to payloads that don't carry one.
    pub default_username: Option<String>,

    /// Icon applied to payloads that don't carry one: an emoji name like
    /// `:ghost:` or an image URL.
    pub default_icon: Option<String>,

    /// Kill switch: when `false` the sender acknowledges payloads without
    /// any network call.
    pub enabled: bool,

    /// Maximum wall-clock time allowed for a single send.
    pub timeout: Duration,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("endpoint", &"[REDACTED]")
            .field("default_channel", &self.default_channel)
            .field("default_username", &self.default_username)
            .field("default_icon", &self.default_icon)
            .field("enabled", &self.enabled)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl WebhookConfig {
    /// Create a new configuration for the given endpoint URL, enabled, with
    /// a 30 second timeout and no default metadata.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            default_channel: None,
            default_username: None,
            default_icon: None,
            enabled: true,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the default channel.
    #[must_use]
    pub fn with_default_channel(mut self, channel: impl Into<String>) -> Self {
        self.default_channel = Some(channel.into());
        self
    }

    /// Set the default username.
    #[must_use]
    pub fn with_default_username(mut self, username: impl Into<String>) -> Self {
        self.default_username = Some(username.into());
        self
    }

    /// Set the default icon.
    #[must_use]
    pub fn with_default_icon(mut self, icon: impl Into<String>) -> Self {
        self.default_icon = Some(icon.into());
        self
    }

    /// Enable or disable actual network delivery.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override the send timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
