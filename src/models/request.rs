use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::enums::{BloodType, RequestStatus};

/// Inbound payload for "submit blood request".
///
/// Every field is optional at the wire level; required-ness
/// (`bloodGroup`, `location`, `hospital`) is enforced by the
/// orchestrator so that all missing fields are reported together
/// instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub name: Option<String>,
    pub blood_group: Option<String>,
    pub units: Option<u32>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub gender: Option<String>,
    pub hospital: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    /// Fallback requester identity when no auth context is present.
    pub user_id: Option<String>,
}

/// A persisted blood request record.
///
/// Created once per invocation with status `active`; lifecycle beyond
/// creation belongs to the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: String,
    pub name: Option<String>,
    pub blood_group: BloodType,
    pub units: u32,
    pub date: Option<String>,
    pub time: Option<String>,
    pub gender: Option<String>,
    pub hospital: String,
    /// Resolved location in `"lat,lng"` storage form.
    pub location: String,
    pub phone: Option<String>,
    pub requested_by: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Success response for "submit blood request".
///
/// `notifications_sent` counts dispatch attempts, not confirmed
/// deliveries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub success: bool,
    pub notifications_sent: usize,
    pub request_id: String,
}
