//! Sender capability for the Courier delivery queue.
//!
//! A [`Sender`] transmits one already-serialized payload to the remote
//! endpoint; the delivery queue owns retry policy and only observes success
//! or failure. The queue never constructs a sender -- the hosting application
//! supplies one (typically [`courier-webhook`]'s HTTP sender) via explicit
//! injection.
//!
//! [`courier-webhook`]: https://docs.rs/courier-webhook

pub mod error;
pub mod sender;

pub use error::SenderError;
pub use sender::{DynSender, Sender};
