//! Diesel and pool error mapping for the user repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool checkout or build failures to a connection error.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

/// Map a Diesel failure raised while handling `email`-scoped writes.
///
/// A unique violation can only come from `users_email_key` (the primary key
/// is a fresh v4 UUID), so it is reported as a duplicate email.
pub(super) fn map_insert_error(error: DieselError, email: &str) -> UserPersistenceError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                "user insert hit unique constraint"
            );
            UserPersistenceError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

/// Map common Diesel error variants into query or connection errors.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}
