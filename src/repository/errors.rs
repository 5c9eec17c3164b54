use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// The first three variants are the client-recoverable taxonomy; pool and
/// database failures are internal and must not leak storage detail to
/// callers.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A value failed a domain constraint.
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },
    /// A uniqueness constraint rejected the write at commit.
    #[error("{field} already exists: {value}")]
    Conflict { field: String, value: String },
    /// The targeted record does not exist.
    #[error("{id} not found")]
    NotFound { id: String },
    /// Checking a connection out of the pool failed.
    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The storage engine reported a failure.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Maps a unique-constraint violation on `field` to [`RepositoryError::Conflict`].
///
/// This is the single place a storage duplicate-key error becomes a typed
/// conflict; nothing else inspects database error kinds.
pub fn map_unique_violation(
    err: diesel::result::Error,
    field: &'static str,
    value: &str,
) -> RepositoryError {
    match err {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::Conflict {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        other => RepositoryError::Database(other),
    }
}
