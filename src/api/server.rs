//! HTTP server lifecycle.
//!
//! Binds the listener, serves the API router, and shuts down gracefully
//! on ctrl-c or an explicit shutdown signal.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::core_state::CoreState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// A running server. Dropping the handle does not stop the server;
/// call [`ServerHandle::shutdown`].
pub struct ServerHandle {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Signal the server to stop accepting connections and drain.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the serve task to finish.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Bind `addr` and serve the API in a background task.
pub async fn start(core: Arc<CoreState>, addr: SocketAddr) -> Result<ServerHandle, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let bound = listener.local_addr()?;

    let app = api_router(core);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async {
            let _ = shutdown_rx.await;
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("server error: {e}");
        }
    });

    tracing::info!(addr = %bound, "API server started");

    Ok(ServerHandle {
        addr: bound,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Serve on the configured address until ctrl-c.
pub async fn serve(core: Arc<CoreState>) -> Result<(), ServerError> {
    let addr = core.config.bind_addr;
    let mut handle = start(core, addr).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    handle.shutdown();
    handle.wait().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geocode::MockGeocoder;
    use crate::push::MockPushSender;
    use crate::store::MemoryStore;

    fn test_core() -> Arc<CoreState> {
        Arc::new(CoreState::with_collaborators(
            Config::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(MockGeocoder::unreachable()),
            Arc::new(MockPushSender::new()),
        ))
    }

    #[tokio::test]
    async fn starts_on_ephemeral_port_and_answers_health() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let mut handle = start(test_core(), addr).await.unwrap();
        assert_ne!(handle.addr.port(), 0);

        let url = format!("http://{}/api/health", handle.addr);
        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), 200);
        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        handle.shutdown();
        handle.wait().await;
    }

    #[tokio::test]
    async fn shutdown_stops_serving() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let mut handle = start(test_core(), addr).await.unwrap();
        let bound = handle.addr;

        handle.shutdown();
        handle.wait().await;

        let url = format!("http://{bound}/api/health");
        let result = reqwest::Client::new()
            .get(&url)
            .timeout(std::time::Duration::from_millis(500))
            .send()
            .await;
        assert!(result.is_err());
    }
}
