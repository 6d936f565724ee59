//! Classification of Diesel failures shared by the repositories.
//!
//! Repositories translate a [`StoreFailure`] into their own port error so
//! that constraint violations raised by PostgreSQL surface as the same
//! domain failures the services check for up front.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::validation::fields;

/// Unique constraint on `employees.employee_code`.
pub(crate) const EMPLOYEE_CODE_KEY: &str = "employees_employee_code_key";
/// Unique constraint on `employees.email`.
pub(crate) const EMPLOYEE_EMAIL_KEY: &str = "employees_email_key";
/// Unique constraint on `projects.project_code`.
pub(crate) const PROJECT_CODE_KEY: &str = "projects_project_code_key";

/// Coarse category of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The connection dropped or could not be used.
    Connection(String),
    /// A unique constraint rejected the write; carries the field wire name
    /// when the constraint is known.
    Unique(Option<&'static str>),
    /// A foreign key rejected the write.
    ForeignKey,
    /// Anything else.
    Query(String),
}

/// Map a unique constraint name to the wire name of its column.
pub(crate) fn field_for_constraint(constraint: &str) -> Option<&'static str> {
    match constraint {
        EMPLOYEE_CODE_KEY => Some(fields::EMPLOYEE_CODE),
        EMPLOYEE_EMAIL_KEY => Some(fields::EMAIL),
        PROJECT_CODE_KEY => Some(fields::PROJECT_CODE),
        _ => None,
    }
}

/// Classify a Diesel error, logging the database detail at debug level.
pub(crate) fn classify_diesel_error(error: DieselError) -> StoreFailure {
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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::Unique(info.constraint_name().and_then(field_for_constraint))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StoreFailure::ForeignKey
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => StoreFailure::Connection("database connection error".to_owned()),
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error".to_owned()),
        _ => StoreFailure::Query("database error".to_owned()),
    }
}
