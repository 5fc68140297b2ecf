//! Error types for registration operations.
//!
//! Every failure an operation can produce is a [`RegistrationError`]. Each
//! variant maps to exactly one HTTP status through
//! [`RegistrationError::status_code`], so transport layers never have to
//! inspect error messages.

use crate::storage::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for registration operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// One or more payload fields violate the registration schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The identifier does not have the store's id shape
    #[error("Invalid ID format: '{id}'")]
    MalformedIdentifier { id: String },

    /// No registration exists with the given identifier
    #[error("Registration not found: {id}")]
    NotFound { id: String },

    /// A unique field already holds the given value
    #[error("Duplicate key: {field} '{value}' already exists")]
    DuplicateKey { field: String, value: String },

    /// A list parameter could not be interpreted
    #[error("Invalid query parameter '{parameter}': {message}")]
    InvalidQuery { parameter: String, message: String },

    /// Any other failure reported by the document store
    #[error("Persistence error: {0}")]
    Persistence(#[source] StorageError),
}

impl RegistrationError {
    /// Create a malformed identifier error
    pub fn malformed_identifier(id: impl Into<String>) -> Self {
        Self::MalformedIdentifier { id: id.into() }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an invalid query error
    pub fn invalid_query(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// HTTP status code the error is surfaced as.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_)
            | Self::MalformedIdentifier { .. }
            | Self::DuplicateKey { .. }
            | Self::InvalidQuery { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Persistence(_) => 500,
        }
    }

    /// Stable code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MalformedIdentifier { .. } => "INVALID_ID",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateKey { .. } => "DUPLICATE_KEY",
            Self::InvalidQuery { .. } => "INVALID_QUERY",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl From<StorageError> for RegistrationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::DuplicateKey { field, value } => Self::DuplicateKey { field, value },
            other => Self::Persistence(other),
        }
    }
}

/// A single schema violation, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// All violations found in one payload.
///
/// Validation is exhaustive, so this always carries every failing field
/// rather than only the first one encountered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding one violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any violation is tagged with `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Names of the failing fields, in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join(". "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Errors that can occur while building the service configuration.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// An environment variable held a value that could not be parsed
    #[error("Invalid value '{value}' for environment variable {variable}")]
    InvalidEnvironment { variable: String, value: String },
}

/// Errors raised when a method and path do not resolve to an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No route for path '{path}'")]
    NotFound { path: String },

    #[error("Method '{method}' not allowed for path '{path}'")]
    MethodNotAllowed { method: String, path: String },
}

impl RouteError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
        }
    }
}

// Result type aliases for convenience
pub type RegistrationResult<T> = Result<T, RegistrationError>;
pub type ValidationResult<T> = Result<T, ValidationErrors>;
pub type BuildResult<T> = Result<T, BuildError>;
