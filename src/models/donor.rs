use serde::{Deserialize, Serialize};

use crate::models::enums::BloodType;

/// A registered user profile as read from the donor store.
///
/// Only profiles with `is_donor == true` are pulled from the store,
/// but the flag is kept on the struct and re-checked by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorProfile {
    pub id: String,
    pub blood_type: BloodType,
    pub is_donor: bool,
    /// Push delivery token. Donors without one cannot be notified.
    pub fcm_token: Option<String>,
    /// Last-known location in `"lat,lng"` storage form.
    pub location: Option<String>,
    /// Device metadata, carried through for diagnostics only.
    pub platform: Option<String>,
    pub device_type: Option<String>,
}
