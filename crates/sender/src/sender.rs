use async_trait::async_trait;
use serde_json::Value;

use crate::error::SenderError;

/// Capability that performs the actual network transmission of one payload.
///
/// Implementations are shared across concurrently executing delivery jobs and
/// must be safe for concurrent invocation. A return of `Ok(())` is the only
/// success signal the queue acts on; any error is treated as a transient
/// failure and retried.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods. For dynamic dispatch use [`DynSender`] -- every `Sender`
/// implements it via a blanket implementation.
pub trait Sender: Send + Sync {
    /// Returns the unique name of this sender, used in logs.
    fn name(&self) -> &str;

    /// Transmit the serialized payload to the remote endpoint.
    fn send(
        &self,
        payload: &Value,
    ) -> impl std::future::Future<Output = Result<(), SenderError>> + Send;
}

/// Object-safe sender trait for use behind `Arc<dyn DynSender>`.
///
/// You generally should not implement this trait directly -- implement
/// [`Sender`] and rely on the blanket implementation.
#[async_trait]
pub trait DynSender: Send + Sync {
    /// Returns the unique name of this sender, used in logs.
    fn name(&self) -> &str;

    /// Transmit the serialized payload to the remote endpoint.
    async fn send(&self, payload: &Value) -> Result<(), SenderError>;
}

/// Blanket implementation bridging the static and dynamic dispatch worlds.
#[async_trait]
impl<T: Sender + Sync> DynSender for T {
    fn name(&self) -> &str {
        Sender::name(self)
    }

    async fn send(&self, payload: &Value) -> Result<(), SenderError> {
        Sender::send(self, payload).await
    }
}
