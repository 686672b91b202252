//! Storage-level failure taxonomy shared by every repository.

use thiserror::Error;

/// Failure returned by a repository call.
///
/// Callers match on the variant, never on the message text.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violation")]
    UniqueViolation { constraint: Option<String> },

    /// The store did not answer within the configured query timeout.
    #[error("store call timed out")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return RepositoryError::UniqueViolation {
                    constraint: db.constraint().map(str::to_owned),
                };
            }
        }

        if matches!(e, sqlx::Error::PoolTimedOut) {
            return RepositoryError::Timeout;
        }

        RepositoryError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::PoolTimedOut),
            RepositoryError::Timeout
        ));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::RowNotFound),
            RepositoryError::Database(_)
        ));
    }
}
