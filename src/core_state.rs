//! Process-wide application context.
//!
//! `CoreState` is built once at startup and passed explicitly into the
//! API layer and the orchestrator. It holds the configuration plus the
//! three external collaborators behind their trait seams, so tests can
//! swap any of them for a mock. No ambient singletons.

use std::sync::Arc;

use crate::config::Config;
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::push::{FcmClient, PushSender};
use crate::store::{DonorStore, SqliteStore, StoreError};

pub struct CoreState {
    pub config: Config,
    store: Arc<dyn DonorStore>,
    geocoder: Arc<dyn Geocoder>,
    push: Arc<dyn PushSender>,
}

impl CoreState {
    /// Build the production context: SQLite store, Nominatim geocoder,
    /// FCM push client.
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let store = Arc::new(SqliteStore::open(config.db_path.clone())?);
        let geocoder = Arc::new(NominatimGeocoder::new(
            &config.geocoder_base_url,
            &config.geocoder_user_agent,
            config.http_timeout,
        ));
        let push = Arc::new(FcmClient::new(
            &config.fcm_endpoint,
            &config.fcm_server_key,
            config.http_timeout,
        ));
        Ok(Self {
            config,
            store,
            geocoder,
            push,
        })
    }

    /// Build a context with explicit collaborators (tests).
    pub fn with_collaborators(
        config: Config,
        store: Arc<dyn DonorStore>,
        geocoder: Arc<dyn Geocoder>,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            config,
            store,
            geocoder,
            push,
        }
    }

    pub fn store(&self) -> &dyn DonorStore {
        self.store.as_ref()
    }

    pub fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }

    pub fn push(&self) -> Arc<dyn PushSender> {
        Arc::clone(&self.push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::MockGeocoder;
    use crate::push::MockPushSender;
    use crate::store::MemoryStore;

    #[test]
    fn collaborators_are_swappable() {
        let state = CoreState::with_collaborators(
            Config::default(),
            Arc::new(MemoryStore::with_donors(vec![])),
            Arc::new(MockGeocoder::empty()),
            Arc::new(MockPushSender::new()),
        );
        assert!(state.store().donor_pool().unwrap().is_empty());
    }

    #[test]
    fn production_context_opens_store() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            db_path: tmp.path().join("raktlink.db"),
            ..Config::default()
        };
        let state = CoreState::new(config).unwrap();
        assert!(state.store().donor_pool().unwrap().is_empty());
    }
}
