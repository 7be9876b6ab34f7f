//! Form definitions backing the catalog and inquiry routes.

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod inquiries;
pub mod packages;

/// A single rejected input field, reported back to the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid fields: {}", list_fields(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("constraint violated: {0}")]
    Constraint(TypeConstraintError),
}

fn list_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Maps `snake_case` struct field names onto the camelCase names used on the wire.
fn wire_name(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            result.extend(ch.to_uppercase());
            upper = false;
        } else {
            result.push(ch);
        }
    }
    result
}

impl FormError {
    /// Flattens the error into per-field entries sorted by field name.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    let field = wire_name(&field);
                    errors.iter().map(move |error| {
                        let message = error
                            .message
                            .as_ref()
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        FieldError::new(field.clone(), message)
                    })
                })
                .collect(),
            FormError::InvalidFields(errors) => errors.clone(),
            FormError::Constraint(err) => vec![FieldError::new("body", err.to_string())],
        };
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        errors
    }
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}
