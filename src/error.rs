//! Error definitions for the naming pass.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::position::SourcePosition;

#[derive(Debug, Error)]
/// Top-level error type returned by public APIs.
pub enum NamingError {
    /// One or more validation errors; returned by the strict entry point.
    #[error("invalid service definition: {}", summarize_errors(.errors))]
    Invalid { errors: Vec<ValidationError> },
    /// A service member of a kind the pass does not know. Indicates a defect
    /// in whatever produced the definition model, not a user error.
    #[error("internal consistency error: unrecognized kind for member #{index} of '{service}'")]
    UnrecognizedMember { service: String, index: usize },
    /// Definition model or options could not be loaded.
    #[error("model error: {0}")]
    ModelError(String),
    /// Output serialization failure.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl NamingError {
    /// Validation errors carried by [`NamingError::Invalid`]; empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            NamingError::Invalid { errors } => errors,
            _ => &[],
        }
    }
}

fn summarize_errors(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no errors".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Category of a collected validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Target-language attribute on an element kind that takes no parameters.
    UnexpectedAttribute,
    /// Parameter not recognized for the element kind it appears on.
    UnexpectedParameter,
    /// More than one target-language attribute on the same element.
    DuplicateAttribute,
    /// Two generated top-level types with case-insensitively equal names.
    DuplicateGeneratedType,
}

/// A single naming problem with the schema position it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    pub position: SourcePosition,
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        message: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl std::error::Error for ValidationError {}
