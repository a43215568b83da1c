//! Document-store collaborator seam.
//!
//! The orchestrator only needs two capabilities: "all donor-flagged
//! profiles" and "append one request record, return its id". The real
//! backing is SQLite opened per operation; tests use an in-memory
//! store.

use std::path::PathBuf;
use std::sync::Mutex;

use uuid::Uuid;

use crate::db;
use crate::models::{BloodRequest, DonorProfile};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store failure: {0}")]
    Database(#[from] db::DatabaseError),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub trait DonorStore: Send + Sync {
    /// All profiles with the donor flag set.
    fn donor_pool(&self) -> Result<Vec<DonorProfile>, StoreError>;

    /// Persist a request record, returning its generated id.
    fn insert_request(&self, request: &BloodRequest) -> Result<String, StoreError>;
}

// ═══════════════════════════════════════════════════════════
// SQLite-backed store
// ═══════════════════════════════════════════════════════════

/// Opens a fresh connection per operation; SQLite serializes its own
/// writes, so no shared connection state is held across calls.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Creates the parent directory and runs migrations eagerly so a
    /// broken path fails at startup, not mid-request.
    pub fn open(db_path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }
        db::open_database(&db_path)?;
        Ok(Self { db_path })
    }
}

impl DonorStore for SqliteStore {
    fn donor_pool(&self) -> Result<Vec<DonorProfile>, StoreError> {
        let conn = db::open_database(&self.db_path)?;
        Ok(db::list_donors(&conn)?)
    }

    fn insert_request(&self, request: &BloodRequest) -> Result<String, StoreError> {
        let conn = db::open_database(&self.db_path)?;
        db::insert_request(&conn, request)?;
        Ok(request.id.clone())
    }
}

// ═══════════════════════════════════════════════════════════
// In-memory store for tests
// ═══════════════════════════════════════════════════════════

/// In-memory store holding donors and recording inserted requests.
#[derive(Default)]
pub struct MemoryStore {
    donors: Vec<DonorProfile>,
    requests: Mutex<Vec<BloodRequest>>,
    fail_inserts: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_donors(donors: Vec<DonorProfile>) -> Self {
        Self {
            donors,
            requests: Mutex::new(Vec::new()),
            fail_inserts: false,
        }
    }

    /// Every `insert_request` fails; used to verify persist-before-
    /// dispatch ordering.
    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("store lock").len()
    }

    pub fn requests(&self) -> Vec<BloodRequest> {
        self.requests.lock().expect("store lock").clone()
    }
}

impl DonorStore for MemoryStore {
    fn donor_pool(&self) -> Result<Vec<DonorProfile>, StoreError> {
        Ok(self
            .donors
            .iter()
            .filter(|d| d.is_donor)
            .cloned()
            .collect())
    }

    fn insert_request(&self, request: &BloodRequest) -> Result<String, StoreError> {
        if self.fail_inserts {
            return Err(StoreError::Unavailable("insert disabled".into()));
        }
        self.requests
            .lock()
            .expect("store lock")
            .push(request.clone());
        Ok(request.id.clone())
    }
}

/// Generate a new request record id.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}
