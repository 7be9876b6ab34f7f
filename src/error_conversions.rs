//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions from [`TypeConstraintError`] live here instead.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(val: TypeConstraintError) -> Self {
        FormError::Constraint(val)
    }
}

