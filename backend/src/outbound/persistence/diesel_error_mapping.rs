//! Diesel and pool error mapping shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::TravelOrderRepositoryError;

use super::pool::PoolError;

/// Map pool failures onto a repository connection error.
pub fn map_pool_error(error: PoolError) -> TravelOrderRepositoryError {
    TravelOrderRepositoryError::connection(error.into_message())
}

/// Map Diesel failures onto repository errors.
///
/// Only a closed connection counts as a connection problem; everything else
/// is reported as a query failure with a stable message.
pub fn map_diesel_error(error: DieselError) -> TravelOrderRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => TravelOrderRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            TravelOrderRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TravelOrderRepositoryError::connection("database connection error")
        }
        _ => TravelOrderRepositoryError::query("database error"),
    }
}

/// Whether `error` was raised by the constraint called `name`.
pub fn violates_constraint(error: &DieselError, name: &str) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(_, info) if info.constraint_name() == Some(name)
    )
}
