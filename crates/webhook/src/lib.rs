//! HTTP webhook sender for the Courier delivery pipeline.
//!
//! This crate implements the [`Sender`](courier_sender::Sender) trait by
//! posting serialized payloads as JSON to a configured webhook endpoint,
//! merging endpoint-level defaults (channel, username, icon) into payloads
//! that left them unset.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use courier_webhook::{WebhookConfig, WebhookSender};
//!
//! let config = WebhookConfig::new("https://hooks.example.com/services/T000/B000/XXXX")
//!     .with_default_channel("#general")
//!     .with_default_username("courier")
//!     .with_default_icon(":bell:");
//! let sender = WebhookSender::new(config);
//! ```

pub mod config;
pub mod error;
pub mod sender;

pub use config::WebhookConfig;
pub use error::WebhookError;
pub use sender::WebhookSender;
