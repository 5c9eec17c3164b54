use thiserror::Error;

use crate::repository::RepositoryError;

/// Error taxonomy returned from the operation surface.
///
/// The first three variants map to client-error responses; `Internal` maps
/// to a server error and never exposes storage detail. Read-side catalog
/// operations never produce `Conflict`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// Malformed or missing input; recoverable by correcting the request.
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },
    /// A uniqueness rule rejected the write.
    #[error("{field} already exists: {value}")]
    Conflict { field: String, value: String },
    /// The operation targeted a nonexistent record.
    #[error("{0} not found")]
    NotFound(String),
    /// Storage or pool failure; detail is logged, not exposed.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation { field, reason } => Self::Validation { field, reason },
            RepositoryError::Conflict { field, value } => Self::Conflict { field, value },
            RepositoryError::NotFound { id } => Self::NotFound(id),
            RepositoryError::Pool(_) | RepositoryError::Database(_) => Self::Internal,
        }
    }
}
