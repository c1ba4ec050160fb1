//! Store errors.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors that may occur while reading from or writing to the bridge store.
///
/// Absent rows are not errors: lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write would break a uniqueness, reference or continuity rule of the store.
    ///
    /// Retrying the same write cannot succeed.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Any other database failure, such as a lost connection.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A stored column could not be decoded into its domain type.
    #[error("corrupt column {column}: {value}")]
    Corrupt {
        /// The column name.
        column: &'static str,
        /// The raw column value.
        value: String,
    },

    /// A numeric value does not fit the column it is stored in.
    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
}

impl StoreError {
    /// Returns `true` if the error is an integrity violation.
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation |
                ErrorKind::ForeignKeyViolation |
                ErrorKind::NotNullViolation |
                ErrorKind::CheckViolation => {
                    return Self::Integrity(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}
