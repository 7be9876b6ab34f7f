use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Seed data error: {0}")]
    SeedError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SeedError(format!("Malformed package seed: {err}"))
    }
}
