//! Per-recipient notification payload construction.
//!
//! The wire shape mirrors the FCM message format: a visible
//! notification block, a flat string-to-string data payload the client
//! app uses to render the request detail screen with accept/reject
//! actions, and platform hint blocks for Android and APNs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{BloodRequest, CandidateMatch};

/// Fixed action vocabulary understood by the client app.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";
pub const DETAIL_SCREEN: &str = "/bloodRequestDetails";
pub const ACTION_TYPE: &str = "blood_request";
pub const ACCEPT_ACTION: &str = "ACCEPT_BLOOD_REQUEST";
pub const REJECT_ACTION: &str = "REJECT_BLOOD_REQUEST";

pub const ANDROID_CHANNEL_ID: &str = "blood_requests";
pub const APNS_CATEGORY: &str = "BLOOD_REQUEST_CATEGORY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidNotification {
    pub click_action: String,
    pub default_sound: bool,
    pub default_vibrate_timings: bool,
    pub visibility: String,
    pub priority: String,
    pub channel_id: String,
}

impl Default for AndroidNotification {
    fn default() -> Self {
        Self {
            click_action: CLICK_ACTION.into(),
            default_sound: true,
            default_vibrate_timings: true,
            visibility: "PUBLIC".into(),
            priority: "max".into(),
            channel_id: ANDROID_CHANNEL_ID.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub priority: String,
    pub notification: AndroidNotification,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            priority: "high".into(),
            notification: AndroidNotification::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aps {
    pub sound: String,
    pub badge: u32,
    pub category: String,
    pub content_available: bool,
    #[serde(rename = "mutable-content")]
    pub mutable_content: u8,
}

impl Default for Aps {
    fn default() -> Self {
        Self {
            sound: "default".into(),
            badge: 1,
            category: APNS_CATEGORY.into(),
            content_available: true,
            mutable_content: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

/// One fully-constructed per-recipient message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub token: String,
    pub notification: Notification,
    /// Flat string map; BTreeMap keeps serialization deterministic.
    pub data: BTreeMap<String, String>,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

/// Build the notification for one candidate.
///
/// Title `"<bloodType> Blood Required"`, body
/// `"<units> units needed at <hospital>"`, data payload carrying the
/// request details plus the candidate's computed distance.
pub fn build_candidate_message(request: &BloodRequest, candidate: &CandidateMatch) -> PushMessage {
    let mut data = BTreeMap::new();
    data.insert("requestId".into(), request.id.clone());
    data.insert("bloodGroup".into(), request.blood_group.to_string());
    data.insert("hospital".into(), request.hospital.clone());
    data.insert("units".into(), request.units.to_string());
    data.insert("patientName".into(), request.name.clone().unwrap_or_default());
    data.insert(
        "patientGender".into(),
        request.gender.clone().unwrap_or_default(),
    );
    data.insert("requestDate".into(), request.date.clone().unwrap_or_default());
    data.insert("requestTime".into(), request.time.clone().unwrap_or_default());
    data.insert("requestLocation".into(), request.location.clone());
    data.insert("requestPhone".into(), request.phone.clone().unwrap_or_default());
    data.insert("distance".into(), candidate.distance_km.to_string());
    data.insert("click_action".into(), CLICK_ACTION.into());
    data.insert("screen".into(), DETAIL_SCREEN.into());
    data.insert("actionType".into(), ACTION_TYPE.into());
    data.insert("hasActions".into(), "true".into());
    data.insert("acceptAction".into(), ACCEPT_ACTION.into());
    data.insert("rejectAction".into(), REJECT_ACTION.into());

    PushMessage {
        token: candidate.fcm_token.clone(),
        notification: Notification {
            title: format!("{} Blood Required", request.blood_group),
            body: format!("{} units needed at {}", request.units, request.hospital),
        },
        data,
        android: AndroidConfig::default(),
        apns: ApnsConfig::default(),
    }
}
