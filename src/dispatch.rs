//! Notification fan-out.
//!
//! Sends are independent and order-insensitive, so they run
//! concurrently with a bounded number in flight. A per-recipient
//! failure is logged and never aborts siblings or the request.
//! The await policy is explicit: `Awaited` settles all sends before
//! returning, `Detached` returns once dispatch is initiated and lets
//! the sends finish on a background task.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use serde::Deserialize;

use crate::push::{PushMessage, PushSender};

/// Maximum concurrent sends per request.
pub const MAX_IN_FLIGHT: usize = 8;

/// Whether the response waits for the fan-out to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Await all sends; the response reflects a settled fan-out.
    Awaited,
    /// Fire-and-forget; sends continue on a spawned task.
    Detached,
}

/// Dispatch one message per candidate.
///
/// Returns the number of attempted dispatches (the candidate count),
/// not the number of confirmed deliveries.
pub async fn dispatch_all(
    sender: Arc<dyn PushSender>,
    messages: Vec<PushMessage>,
    policy: DispatchPolicy,
) -> usize {
    let attempted = messages.len();
    if attempted == 0 {
        return 0;
    }

    match policy {
        DispatchPolicy::Awaited => {
            run_fanout(sender, messages).await;
        }
        DispatchPolicy::Detached => {
            tokio::spawn(run_fanout(sender, messages));
        }
    }

    attempted
}

async fn run_fanout(sender: Arc<dyn PushSender>, messages: Vec<PushMessage>) {
    let failures = stream::iter(messages)
        .map(|message| {
            let sender = Arc::clone(&sender);
            async move {
                match sender.send(&message).await {
                    Ok(()) => {
                        tracing::debug!(token = %message.token, "Notification sent");
                        0usize
                    }
                    Err(e) => {
                        tracing::warn!(token = %message.token, error = %e, "Notification send failed");
                        1usize
                    }
                }
            }
        })
        .buffer_unordered(MAX_IN_FLIGHT)
        .fold(0usize, |acc, failed| async move { acc + failed })
        .await;

    if failures > 0 {
        tracing::warn!(failures, "Fan-out finished with failures");
    }
}
