//! Mapping of pool and Diesel failures into domain persistence errors.

use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Pool failures always surface as connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PersistenceError::connection(message)
}

/// Map common Diesel error variants into query or connection errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        _ => PersistenceError::query("database error"),
    }
}
