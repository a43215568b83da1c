use std::str::FromStr;

use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{BloodType, DonorProfile};

pub fn upsert_donor(conn: &Connection, donor: &DonorProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, blood_type, is_donor, fcm_token, location, platform, device_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
             blood_type = excluded.blood_type,
             is_donor = excluded.is_donor,
             fcm_token = excluded.fcm_token,
             location = excluded.location,
             platform = excluded.platform,
             device_type = excluded.device_type",
        params![
            donor.id,
            donor.blood_type.as_str(),
            donor.is_donor as i32,
            donor.fcm_token,
            donor.location,
            donor.platform,
            donor.device_type,
        ],
    )?;
    Ok(())
}

/// All donor-flagged profiles. The flag is filtered here so the pull
/// stays bounded; the matcher re-checks it anyway.
pub fn list_donors(conn: &Connection) -> Result<Vec<DonorProfile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, blood_type, is_donor, fcm_token, location, platform, device_type
         FROM users WHERE is_donor = 1",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i32>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, Option<String>>(6)?,
        ))
    })?;

    let mut donors = Vec::new();
    for row in rows {
        let (id, blood_type, is_donor, fcm_token, location, platform, device_type) = row?;
        donors.push(DonorProfile {
            id,
            blood_type: BloodType::from_str(&blood_type)?,
            is_donor: is_donor != 0,
            fcm_token,
            location,
            platform,
            device_type,
        });
    }
    Ok(donors)
}
