//! Typed input boundary.
//!
//! Transport-level handlers deserialize request bodies into these forms and
//! convert them to payloads of domain newtypes before the services layer is
//! invoked. Malformed identifiers and out-of-range values are rejected here,
//! before any storage call.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod categories;
pub mod products;

/// Error produced when a form fails validation or payload conversion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    /// A declared `validator` rule failed.
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },
    /// A domain type constructor rejected the value.
    #[error("{0}")]
    TypeConstraint(TypeConstraintError),
}

impl FormError {
    /// Name of the first field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } => field,
            Self::TypeConstraint(err) => err.field(),
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "form".to_string());
        Self::Validation {
            field,
            reason: errors.to_string(),
        }
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        Self::TypeConstraint(err)
    }
}
