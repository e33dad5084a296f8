//! Submission facade for the Courier notification pipeline.
//!
//! [`Gateway`] is the one place the payload model and the delivery queue
//! meet: it serializes a [`Message`](courier_message::Message) and enqueues
//! the resulting tree as a fresh delivery job. Everything the gateway needs --
//! queue infrastructure, sender, abandoned-delivery sink -- is injected
//! explicitly at construction.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use courier_gateway::Gateway;
//! use courier_message::{Attachment, Message, MessageError};
//! use courier_queue::DeliveryConfig;
//! use courier_webhook::WebhookConfig;
//!
//! # async fn demo() -> Result<(), MessageError> {
//! let gateway = Gateway::with_webhook(
//!     WebhookConfig::new("https://hooks.example.com/services/T000/B000/XXXX")
//!         .with_default_channel("#ops")
//!         .with_default_username("courier"),
//!     DeliveryConfig::default(),
//! );
//!
//! let message = Message::new()
//!     .with_text("Deploy finished")
//!     .add_attachment(Attachment::new().with_fallback("Deploy finished"))?;
//!
//! gateway.submit(&message).await;
//! # Ok(())
//! # }
//! ```

pub mod gateway;

pub use gateway::Gateway;
