//! Payload model for Courier notification messages.
//!
//! A [`Message`] wraps an ordered tree of [`Attachment`]s, each composed of
//! [`AttachmentField`]s and interactive [`AttachmentAction`]s (optionally
//! guarded by an [`ActionConfirmation`]). Every entity can be built either
//! through the fluent typed API or from a loosely-typed JSON attribute map,
//! and serializes to the canonical wire tree via `to_value()`.
//!
//! Construction is synchronous and side-effect-free; the delivery layer
//! consumes only the serialized tree, never these types.
//!
//! # Quick start
//!
//! ```rust
//! use courier_message::{Attachment, AttachmentField, Message, MessageError};
//!
//! fn build() -> Result<Message, MessageError> {
//!     let attachment = Attachment::new()
//!         .with_fallback("Deploy finished")
//!         .with_color("danger")
//!         .add_field(
//!             AttachmentField::new()
//!                 .with_title("env")
//!                 .with_value("prod")
//!                 .with_short(true),
//!         )?;
//!
//!     Message::new()
//!         .with_text("Deploy finished")
//!         .with_channel("#ops")
//!         .add_attachment(attachment)
//! }
//!
//! let payload = build().unwrap().to_value();
//! assert_eq!(payload["attachments"][0]["color"], "danger");
//! ```

pub mod action;
pub mod attachment;
pub mod error;
pub mod field;
pub mod message;

mod attrs;

pub use action::{ActionArg, ActionConfirmation, AttachmentAction};
pub use attachment::{Attachment, AttachmentArg, MAX_ACTIONS};
pub use error::MessageError;
pub use field::{AttachmentField, FieldArg};
pub use message::Message;
