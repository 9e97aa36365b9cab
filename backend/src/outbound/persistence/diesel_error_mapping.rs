//! Shared Diesel error classification for the repositories.
//!
//! Repositories translate a [`DieselFailure`] into their own port error, so
//! constraint names are matched in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Unique constraint guarding usernames.
pub(crate) const USERNAME_CONSTRAINT: &str = "users_username_key";
/// Unique constraint guarding emails.
pub(crate) const EMAIL_CONSTRAINT: &str = "users_email_key";
/// Foreign key from posts to their author.
pub(crate) const POST_AUTHOR_CONSTRAINT: &str = "posts_author_id_fkey";

/// Coarse category of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Any other query failure.
    Query(String),
}

/// Classify a Diesel error and log its details at debug level.
pub(crate) fn classify(error: DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection("database connection error".to_owned())
                }
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation { constraint },
                DatabaseErrorKind::ForeignKeyViolation => {
                    DieselFailure::ForeignKeyViolation { constraint }
                }
                _ => DieselFailure::Query("database error".to_owned()),
            }
        }
        DieselError::QueryBuilderError(_) => {
            debug!("diesel query builder failed");
            DieselFailure::Query("database query error".to_owned())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            DieselFailure::Query("database error".to_owned())
        }
    }
}
