//! Shared Diesel error mapping for the customer and order adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Rows per `INSERT` statement; keeps bind parameters under the PostgreSQL
/// limit for the widest table.
pub(crate) const INSERT_CHUNK_ROWS: usize = 5_000;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query/connection constructors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: DieselError,
    operation: &'static str,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection(format!("{operation}: database connection closed"))
        }
        other => query(format!("{operation}: {other}")),
    }
}

/// How a unique violation relates to the table's business id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UniqueViolation {
    /// The business id constraint fired.
    BusinessId(String),
    /// Some other unique constraint fired.
    Other(String),
}

/// Classify `error` as a unique violation against `id_constraint`, if it is one.
pub(crate) fn classify_unique_violation(
    error: &DieselError,
    id_constraint: &str,
) -> Option<UniqueViolation> {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = error else {
        return None;
    };
    let detail = info.details().unwrap_or(info.message()).to_owned();
    Some(match info.constraint_name() {
        Some(name) if name == id_constraint => UniqueViolation::BusinessId(detail),
        _ => UniqueViolation::Other(detail),
    })
}
