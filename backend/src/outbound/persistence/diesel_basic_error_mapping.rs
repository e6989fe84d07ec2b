//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.message().to_owned())
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Details stay in the debug log; the port error only carries a generic
/// message.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
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
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Integrity constraint breached by an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    /// A unique index rejected the row; carries the constraint name if known.
    Unique(Option<String>),
    /// A foreign key rejected the row.
    ForeignKey(Option<String>),
}

impl ConstraintViolation {
    /// Whether the violated constraint mentions `column`.
    pub(crate) fn involves(&self, column: &str) -> bool {
        let name = match self {
            Self::Unique(name) | Self::ForeignKey(name) => name.as_deref(),
        };
        name.is_none_or(|name| name.contains(column))
    }
}

/// Classify unique and foreign key violations so adapters can report them as
/// domain conflicts instead of opaque query failures.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Some(
            ConstraintViolation::Unique(info.constraint_name().map(str::to_owned)),
        ),
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => Some(
            ConstraintViolation::ForeignKey(info.constraint_name().map(str::to_owned)),
        ),
        _ => None,
    }
}
