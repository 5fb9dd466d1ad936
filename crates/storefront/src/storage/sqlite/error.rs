//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.
//! Constraint failures become semantic variants so handlers can answer with
//! 409 or 400 instead of 500.

use rusqlite::ffi;
use storefront_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// - `UNIQUE` / `PRIMARYKEY` constraint → `AlreadyExists`
/// - `FOREIGNKEY` / `CHECK` / `NOTNULL` constraint → `InvalidData`
/// - `QueryReturnedNoRows` → `NotFound`
/// - `CannotOpen` → `ConnectionFailed`
/// - a stored value that does not convert to its field → `Serialization`
/// - anything else → `QueryFailed`
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: &str,
) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _) => match sqlite_err.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                RepositoryError::already_exists(entity_type, id)
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            )),
            ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                RepositoryError::InvalidData(format!(
                    "Constraint violation for {entity_type}: {err}"
                ))
            }
            _ if sqlite_err.code == rusqlite::ErrorCode::CannotOpen => {
                RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
            }
            _ => RepositoryError::QueryFailed(err.to_string()),
        },
        rusqlite::Error::QueryReturnedNoRows => RepositoryError::not_found(entity_type, id),
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            RepositoryError::Serialization(format!("Unreadable {entity_type} row: {err}"))
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError when no single ID applies.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    map_tokio_rusqlite_error_with_id(err, entity_type, "unknown")
}

/// Maps a tokio_rusqlite error with a known ID to a RepositoryError.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl ToString,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &id.to_string())
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
