//! Request orchestration: the single pass from inbound payload to
//! dispatched notifications.
//!
//! Stage order is load-bearing: identity and validation run before any
//! external call, geocoding failure aborts before persistence, and
//! persistence failure aborts before dispatch. Notifications are never
//! sent for an unpersisted request. Per-recipient dispatch failures
//! stay inside the fan-out and never escalate to the caller.

use std::str::FromStr;

use crate::core_state::CoreState;
use crate::dispatch;
use crate::geocode::{self, GeocodeError};
use crate::matching;
use crate::models::{BloodRequest, BloodType, RequestStatus, RequestSummary, SubmitRequest};
use crate::push::build_candidate_message;
use crate::store::{self, StoreError};

/// Caller identity resolved by the upstream identity provider.
/// Absent when the request arrived unauthenticated.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Unknown blood group: {0:?}")]
    UnknownBloodGroup(String),
    #[error("No user ID found in request")]
    NoRequesterId,
    #[error("Could not resolve request location: {0}")]
    Geocoding(#[from] GeocodeError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RequestError {
    fn from(err: StoreError) -> Self {
        RequestError::Internal(err.to_string())
    }
}

/// Process one "submit blood request" invocation.
pub async fn process_request(
    state: &CoreState,
    auth: &AuthContext,
    payload: SubmitRequest,
) -> Result<RequestSummary, RequestError> {
    // 1. Resolve identity. The auth context wins over the payload field.
    let requester_id = auth
        .user_id
        .clone()
        .or_else(|| payload.user_id.clone())
        .ok_or(RequestError::NoRequesterId)?;

    tracing::info!(
        requester_id = %requester_id,
        blood_group = payload.blood_group.as_deref().unwrap_or("-"),
        hospital = payload.hospital.as_deref().unwrap_or("-"),
        "Processing blood request"
    );

    // 2. Validate, collecting every missing field before failing.
    let (blood_type, hospital, location_input) = validate(&payload)?;

    // 3. Resolve location (numeric fast path or geocoder).
    let request_loc = geocode::resolve(state.geocoder(), &location_input).await?;
    tracing::debug!(location = %request_loc, "Request location resolved");

    // 4. Match donors against the pool.
    let pool = state.store().donor_pool()?;
    let outcome = matching::find_nearby(
        request_loc,
        blood_type,
        &requester_id,
        state.config.radius_km,
        &pool,
    );

    // 5. Persist before any notification is attempted.
    let record = BloodRequest {
        id: store::new_request_id(),
        name: payload.name,
        blood_group: blood_type,
        units: payload.units.unwrap_or(1),
        date: payload.date,
        time: payload.time,
        gender: payload.gender,
        hospital,
        location: request_loc.to_string(),
        phone: payload.phone,
        requested_by: requester_id,
        status: RequestStatus::Active,
        created_at: chrono::Utc::now(),
    };
    let request_id = state.store().insert_request(&record)?;

    // 6. Fan out one notification per candidate.
    let messages = outcome
        .candidates
        .iter()
        .map(|candidate| build_candidate_message(&record, candidate))
        .collect();
    let notifications_sent =
        dispatch::dispatch_all(state.push(), messages, state.config.dispatch_policy).await;

    tracing::info!(
        request_id = %request_id,
        notifications_sent,
        "Blood request processed"
    );

    Ok(RequestSummary {
        success: true,
        notifications_sent,
        request_id,
    })
}

/// Check the three required fields, reporting all absences at once,
/// then parse the blood group. An unrecognized blood group is rejected
/// rather than silently matching nobody.
fn validate(payload: &SubmitRequest) -> Result<(BloodType, String, String), RequestError> {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    let blood_group = present(&payload.blood_group);
    let location = present(&payload.location);
    let hospital = present(&payload.hospital);

    let mut missing = Vec::new();
    if blood_group.is_none() {
        missing.push("bloodGroup".to_string());
    }
    if location.is_none() {
        missing.push("location".to_string());
    }
    if hospital.is_none() {
        missing.push("hospital".to_string());
    }
    let (blood_group, location, hospital) = match (blood_group, location, hospital) {
        (Some(bg), Some(loc), Some(hosp)) => (bg, loc, hosp),
        _ => return Err(RequestError::MissingFields(missing)),
    };

    let blood_type = BloodType::from_str(blood_group)
        .map_err(|_| RequestError::UnknownBloodGroup(blood_group.to_string()))?;

    Ok((blood_type, hospital.to_string(), location.to_string()))
}
