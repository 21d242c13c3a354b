//! Shared Error Types
//!
//! This module defines error types that are shared between request models,
//! content documents and the backend. They represent input problems that can
//! be reported back to a caller without leaking anything sensitive.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures, always naming the field
//!
//! # Usage
//!
//! ```rust
//! use foundation_cms::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "\"email\" must be a valid email");
//! assert_eq!(error.to_string(), "\"email\" must be a valid email");
//! ```
use thiserror::Error;

/// Shared error types that can occur while decoding or validating input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    ///
    /// The message is shown to the caller verbatim, so it already names the field.
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
