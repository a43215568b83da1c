pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod dispatch;
pub mod geo;
pub mod geocode;
pub mod matching;
pub mod models;
pub mod orchestrator;
pub mod push;
pub mod store;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Wire up tracing, load config from the environment, open the store,
/// and serve until ctrl-c.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = config::Config::from_env();
    let core = Arc::new(core_state::CoreState::new(cfg)?);
    api::serve(core).await?;
    Ok(())
}
