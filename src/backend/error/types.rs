/**
 * Backend Error Types
 *
 * `BackendError` is what every handler returns on failure. It carries
 * exactly what the client will see: a status code and a short message.
 *
 * # Error Categories
 *
 * - `HandlerError` - a client-facing status and message (400, 401, 403, 404, 409, 500)
 * - `SharedError` - validation failures from request models (400)
 * - `Internal` - anything unexpected; the cause is logged, the client only
 *   sees `Server error`
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Generic message for every unexpected failure
pub const SERVER_ERROR: &str = "Server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use foundation_cms::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Blog not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// assert_eq!(err.message(), "Blog not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A failure reported to the client as-is
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Invalid input from a request model or content form
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Unexpected failure; `context` is for logs only
    #[error("Internal error: {context}")]
    Internal {
        context: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// A 500 whose body is a fixed client-safe message rather than the generic one
    pub fn server(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Log an unexpected failure and hide it behind `Server error`
    pub fn internal(context: impl Into<String>) -> Self {
        let context = context.into();
        tracing::error!("{}", context);
        Self::Internal { context }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::SerializationError { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err @ SharedError::ValidationError { .. }) => err.to_string(),
            Self::SharedError(SharedError::SerializationError { .. }) => SERVER_ERROR.to_string(),
            Self::Internal { .. } => SERVER_ERROR.to_string(),
        }
    }
}
