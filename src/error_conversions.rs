//! Error conversion glue between layers.
//!
//! Domain constraint failures surface with the field that failed, so the
//! repository and service layers can report them under the shared taxonomy
//! without string matching.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::Validation {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        let field = err.field().to_string();
        ServiceError::Validation {
            field,
            reason: err.to_string(),
        }
    }
}
