pub mod repository;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },
}

impl From<crate::models::InvalidEnumValue> for DatabaseError {
    fn from(err: crate::models::InvalidEnumValue) -> Self {
        DatabaseError::InvalidEnum {
            field: err.field.to_string(),
            value: err.value,
        }
    }
}
