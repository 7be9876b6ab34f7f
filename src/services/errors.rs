use thiserror::Error;

use crate::forms::{FieldError, FormError};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The named resource does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Field-level details for client errors, empty for everything else.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ServiceError::Form(err) => err.field_errors(),
            _ => Vec::new(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
