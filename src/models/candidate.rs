use crate::models::donor::DonorProfile;

/// A donor that passed all matching filters for one request.
///
/// Transient: exists only between matching and notification dispatch,
/// never persisted.
#[derive(Debug, Clone)]
pub struct CandidateMatch {
    pub donor_id: String,
    pub fcm_token: String,
    /// Distance from the request location, rounded to one decimal (km).
    pub distance_km: f64,
    pub platform: Option<String>,
    pub device_type: Option<String>,
}

impl CandidateMatch {
    pub fn new(donor: &DonorProfile, fcm_token: String, distance_km: f64) -> Self {
        Self {
            donor_id: donor.id.clone(),
            fcm_token,
            distance_km,
            platform: donor.platform.clone(),
            device_type: donor.device_type.clone(),
        }
    }
}
