use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::BloodRequest;

pub fn insert_request(conn: &Connection, request: &BloodRequest) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO blood_requests (id, name, blood_group, units, date, time, gender,
         hospital, location, phone, requested_by, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            request.id,
            request.name,
            request.blood_group.as_str(),
            request.units,
            request.date,
            request.time,
            request.gender,
            request.hospital,
            request.location,
            request.phone,
            request.requested_by,
            request.status.as_str(),
            request.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn count_requests(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM blood_requests", [], |row| row.get(0))?;
    Ok(count)
}
