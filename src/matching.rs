//! Donor matching, the pure filter pipeline at the heart of the
//! service.
//!
//! Filters are applied per donor in a fixed order, short-circuiting on
//! the first failure. The order does not change the surviving set,
//! only which rejection reason gets recorded for diagnostics.

use serde::Serialize;

use crate::geo::{self, Coordinate};
use crate::models::{BloodType, CandidateMatch, DonorProfile};

/// Default matching radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Why a donor was excluded from a request's candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NoPushToken,
    IsRequester,
    NotDonor,
    IncompatibleBloodType,
    NoLocation,
    UnparseableLocation,
    TooFar,
}

/// Aggregate counts over one matching pass, logged for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub checked: usize,
    pub skipped: usize,
    pub compatible: usize,
    pub matched: usize,
}

/// Result of one matching pass over the donor pool.
#[derive(Debug)]
pub struct MatchOutcome {
    pub candidates: Vec<CandidateMatch>,
    pub stats: MatchStats,
}

/// Filter the donor pool down to notifiable candidates.
///
/// A donor survives when it has a push token, is not the requester
/// (exact id match), carries the donor flag, is blood-compatible with
/// the requested type, has a parseable last-known location, and lies
/// within `radius_km` of the request. Pure: no I/O, no ordering
/// guarantee beyond "all survivors present, requester absent".
pub fn find_nearby(
    request_loc: Coordinate,
    requested_type: BloodType,
    requester_id: &str,
    radius_km: f64,
    pool: &[DonorProfile],
) -> MatchOutcome {
    let mut candidates = Vec::new();
    let mut stats = MatchStats::default();

    for donor in pool {
        stats.checked += 1;
        match evaluate(request_loc, requested_type, requester_id, radius_km, donor) {
            Ok(candidate) => {
                stats.compatible += 1;
                stats.matched += 1;
                tracing::debug!(
                    donor_id = %candidate.donor_id,
                    distance_km = candidate.distance_km,
                    "Eligible donor matched"
                );
                candidates.push(candidate);
            }
            Err(reason) => {
                stats.skipped += 1;
                // Rejections after the compatibility check still count
                // as compatible donors in the stats.
                if matches!(
                    reason,
                    RejectReason::NoLocation
                        | RejectReason::UnparseableLocation
                        | RejectReason::TooFar
                ) {
                    stats.compatible += 1;
                }
                tracing::debug!(donor_id = %donor.id, reason = ?reason, "Donor skipped");
            }
        }
    }

    tracing::info!(
        checked = stats.checked,
        skipped = stats.skipped,
        compatible = stats.compatible,
        matched = stats.matched,
        "Donor matching complete"
    );

    MatchOutcome { candidates, stats }
}

/// Apply the filter pipeline to one donor.
fn evaluate(
    request_loc: Coordinate,
    requested_type: BloodType,
    requester_id: &str,
    radius_km: f64,
    donor: &DonorProfile,
) -> Result<CandidateMatch, RejectReason> {
    let token = donor
        .fcm_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(RejectReason::NoPushToken)?;

    // The requester must never appear in its own result set.
    if donor.id == requester_id {
        return Err(RejectReason::IsRequester);
    }

    if !donor.is_donor {
        return Err(RejectReason::NotDonor);
    }

    if !requested_type.accepts_donor(donor.blood_type) {
        return Err(RejectReason::IncompatibleBloodType);
    }

    let location = donor.location.as_deref().ok_or(RejectReason::NoLocation)?;
    let donor_loc: Coordinate = location
        .parse()
        .map_err(|_| RejectReason::UnparseableLocation)?;

    let distance = geo::distance_km(request_loc, donor_loc);
    if distance > radius_km {
        return Err(RejectReason::TooFar);
    }

    Ok(CandidateMatch::new(
        donor,
        token.to_string(),
        geo::round_to_tenth(distance),
    ))
}
