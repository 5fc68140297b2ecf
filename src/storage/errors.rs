//! Store-level error types.
//!
//! These errors describe failures of the document store itself. They carry no
//! knowledge of HTTP or of the registration workflow; the service layer maps
//! them into [`RegistrationError`](crate::error::RegistrationError).

use std::fmt;

/// Errors that can occur during document store operations.
#[derive(Debug)]
pub enum StorageError {
    /// A write would violate a unique index.
    DuplicateKey { field: String, value: String },

    /// The store is closed or cannot be reached.
    Unavailable { message: String },

    /// A document could not be encoded or decoded as JSON.
    Serialization { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DuplicateKey { field, value } => {
                write!(
                    f,
                    "E11000 duplicate key error: {} '{}' already exists",
                    field, value
                )
            }
            StorageError::Unavailable { message } => {
                write!(f, "Storage unavailable: {}", message)
            }
            StorageError::Serialization { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Create a new DuplicateKey error.
    pub fn duplicate_key(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a new Unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Check if this error indicates a uniqueness violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StorageError::DuplicateKey { .. })
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}
