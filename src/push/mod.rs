//! Push-delivery collaborator seam.
//!
//! One `PushMessage` per recipient; each send is independent with its
//! own success/failure outcome. No retry, no receipt tracking.

pub mod fcm;
pub mod message;

pub use fcm::FcmClient;
pub use message::{build_candidate_message, PushMessage};

use std::sync::Mutex;

use futures_util::future::BoxFuture;

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Push request failed: {0}")]
    Http(String),
    #[error("Push service rejected message: status {status}, {body}")]
    Rejected { status: u16, body: String },
}

pub trait PushSender: Send + Sync {
    fn send<'a>(&'a self, message: &'a PushMessage) -> BoxFuture<'a, Result<(), PushError>>;
}

// ═══════════════════════════════════════════════════════════
// Mock sender for tests
// ═══════════════════════════════════════════════════════════

/// Mock sender that records every message and can fail selected tokens.
#[derive(Default)]
pub struct MockPushSender {
    sent: Mutex<Vec<PushMessage>>,
    failing_tokens: Vec<String>,
}

impl MockPushSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends to these tokens return an error; siblings still succeed.
    pub fn failing_for(tokens: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Every message handed to `send`, in arrival order.
    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().expect("push lock").clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("push lock").len()
    }
}

impl PushSender for MockPushSender {
    fn send<'a>(&'a self, message: &'a PushMessage) -> BoxFuture<'a, Result<(), PushError>> {
        Box::pin(async move {
            self.sent.lock().expect("push lock").push(message.clone());
            if self.failing_tokens.contains(&message.token) {
                return Err(PushError::Rejected {
                    status: 404,
                    body: "Requested entity was not found".into(),
                });
            }
            Ok(())
        })
    }
}
