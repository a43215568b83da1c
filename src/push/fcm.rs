use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::Serialize;

use super::message::PushMessage;
use super::{PushError, PushSender};

/// FCM HTTP client. One POST per recipient; outcomes are independent.
pub struct FcmClient {
    endpoint: String,
    server_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct FcmEnvelope<'a> {
    message: &'a PushMessage,
}

impl FcmClient {
    pub fn new(endpoint: &str, server_key: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            server_key: server_key.to_string(),
            client,
        }
    }
}

impl PushSender for FcmClient {
    fn send<'a>(&'a self, message: &'a PushMessage) -> BoxFuture<'a, Result<(), PushError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.endpoint)
                .header("Authorization", format!("key={}", self.server_key))
                .json(&FcmEnvelope { message })
                .send()
                .await
                .map_err(|e| PushError::Http(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(PushError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(())
        })
    }
}
