//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure the SQLite container that backs the member store.
//! - Apply schema migrations in deterministic order.
//! - Classify bootstrap failures so callers can report them instead of
//!   aborting.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No member data is read or written before migrations succeed.
//! - Open failures are returned to the caller, never treated as fatal.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure.
#[derive(Debug)]
pub enum DbError {
    /// The container file could not be opened or created.
    Open(rusqlite::Error),
    /// A statement failed on an open connection.
    Sqlite(rusqlite::Error),
    /// The container was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Stable machine-readable code used in `error_code=` log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Open(_) => "db_open_failed",
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                "db_busy"
            }
            Self::Sqlite(_) => "db_statement_failed",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open member store: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "member store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use rusqlite::ffi;

    fn sqlite_failure(code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), None)
    }

    #[test]
    fn error_code_distinguishes_open_busy_and_schema_failures() {
        assert_eq!(
            DbError::Open(sqlite_failure(ffi::SQLITE_CANTOPEN)).error_code(),
            "db_open_failed"
        );
        assert_eq!(
            DbError::Sqlite(sqlite_failure(ffi::SQLITE_BUSY)).error_code(),
            "db_busy"
        );
        assert_eq!(
            DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows).error_code(),
            "db_statement_failed"
        );
        assert_eq!(
            DbError::UnsupportedSchemaVersion {
                db_version: 9,
                latest_supported: 2,
            }
            .error_code(),
            "db_schema_too_new"
        );
    }

    #[test]
    fn open_failure_message_names_the_store() {
        let err = DbError::Open(sqlite_failure(ffi::SQLITE_CANTOPEN));
        assert!(err.to_string().starts_with("cannot open member store"));
    }
}
