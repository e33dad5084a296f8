//! End-to-end example: build a rich message and deliver it through the
//! bounded-retry queue, with a simulated outage to show the retry policy.
//!
//! Run with: `cargo run -p courier-gateway --example deliver`

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use courier_gateway::Gateway;
use courier_message::{
    ActionConfirmation, Attachment, AttachmentAction, AttachmentField, Message, MessageError,
};
use courier_queue::{AbandonLog, DeliveryConfig, Dispatcher};
use courier_sender::{Sender, SenderError};

/// Sender that prints payloads instead of hitting the network, failing its
/// first two calls to exercise the retry path.
struct PrintingSender {
    calls: AtomicU32,
}

impl Sender for PrintingSender {
    fn name(&self) -> &str {
        "printing"
    }

    async fn send(&self, payload: &serde_json::Value) -> Result<(), SenderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < 2 {
            println!("  [printing-sender] attempt {call}: simulated outage");
            return Err(SenderError::Connection("simulated outage".into()));
        }
        println!("  [printing-sender] delivered: {payload}");
        Ok(())
    }
}

fn build_message() -> Result<Message, MessageError> {
    let attachment = Attachment::new()
        .with_fallback("Deploy 1042 finished: 2 warnings")
        .with_color("warning")
        .with_title("Deploy 1042")
        .with_title_link("https://ci.example.com/builds/1042")
        .add_field(
            AttachmentField::new()
                .with_title("env")
                .with_value("prod")
                .with_short(true),
        )?
        .add_field(
            AttachmentField::new()
                .with_title("warnings")
                .with_value("2")
                .with_short(true),
        )?
        .add_action(
            AttachmentAction::new()
                .with_name("rollback")
                .with_text("Roll back")
                .with_style("danger")
                .with_value("1042")
                .with_confirm(
                    ActionConfirmation::new()
                        .with_title("Roll back deploy 1042?")
                        .with_ok_text("Roll back")
                        .with_dismiss_text("Keep"),
                ),
        )?;

    Message::new()
        .with_text("Deploy 1042 finished")
        .with_channel("#deploys")
        .with_icon(":rocket:")
        .add_attachment(attachment)
}

#[tokio::main]
async fn main() -> Result<(), MessageError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let log = Arc::new(AbandonLog::new());
    let dispatcher = Dispatcher::new(Arc::new(PrintingSender {
        calls: AtomicU32::new(0),
    }))
    .with_abandon_sink(log.clone());
    let config = DeliveryConfig {
        max_attempts: 5,
        retry_delay: Duration::from_secs(1),
    };
    let gateway = Gateway::with_memory_queue(dispatcher, config);

    let id = gateway.submit(&build_message()?).await;
    println!("submitted job {id}");

    // Give the broker time to work through the simulated outage.
    tokio::time::sleep(Duration::from_secs(5)).await;
    for entry in log.drain() {
        println!(
            "abandoned after {} attempts: {}",
            entry.attempts, entry.payload
        );
    }
    Ok(())
}
