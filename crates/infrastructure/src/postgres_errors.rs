//! Mapping of PostgreSQL failures onto application errors.

use ohs_audit_core::AppError;
use ohs_audit_domain::input::INVALID_REFERENCE;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a failed write. Unique violations become `Conflict` with the given
/// message, foreign key violations become a field error on the referencing
/// column, everything else is `Internal`.
pub(crate) fn write_error(error: sqlx::Error, operation: &str, conflict: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error {
        match database_error.code().as_deref() {
            Some(UNIQUE_VIOLATION) => return AppError::Conflict(conflict.to_owned()),
            Some(FOREIGN_KEY_VIOLATION) => {
                let field = database_error
                    .constraint()
                    .and_then(|constraint| {
                        reference_field(database_error.table().unwrap_or_default(), constraint)
                    })
                    .unwrap_or_else(|| "*".to_owned());
                return AppError::field(&field, INVALID_REFERENCE);
            }
            _ => {}
        }
    }

    internal_error(error, operation)
}

/// Maps a failed query to `Internal` with context.
pub(crate) fn internal_error(error: sqlx::Error, operation: &str) -> AppError {
    AppError::Internal(format!("failed to {operation}: {error}"))
}

/// Derives the form field from a default foreign key constraint name such as
/// `projects_consulting_engineer_id_fkey`.
fn reference_field(table: &str, constraint: &str) -> Option<String> {
    let column = constraint
        .strip_suffix("_fkey")?
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix('_'))?;

    Some(column.strip_suffix("_id").unwrap_or(column).to_owned())
}
