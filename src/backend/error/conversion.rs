/**
 * Error Conversion
 *
 * Turns backend errors into HTTP responses and lifts every layer's error
 * type into `BackendError`, so handlers can use `?` throughout.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * Internal causes (database, HTTP clients, hashing, signing) are logged here
 * and never reach the response body.
 */

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::service::AuthError;
use crate::backend::error::types::BackendError;
use crate::backend::mail::MailError;
use crate::backend::media::MediaError;
use crate::backend::store::StoreError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => {
                tracing::warn!("Auth validation failed: {}", e);
                Self::SharedError(e)
            }
            AuthError::Conflict => Self::conflict(err.to_string()),
            AuthError::QuotaExceeded => Self::forbidden(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::UnknownIdentity => Self::unauthorized(err.to_string()),
            AuthError::TokenFailed(ref cause) => {
                tracing::warn!("Token rejected: {}", cause);
                Self::unauthorized(err.to_string())
            }
            AuthError::Store(e) => Self::internal(format!("Credential store error: {e}")),
            AuthError::Password(e) => Self::internal(format!("Password hashing error: {e}")),
            AuthError::Token(e) => Self::internal(format!("Token signing error: {e}")),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::conflict("Already exists"),
            other => Self::internal(format!("Document store error: {other}")),
        }
    }
}

impl From<MediaError> for BackendError {
    fn from(err: MediaError) -> Self {
        Self::internal(format!("Media upload error: {err}"))
    }
}

impl From<MailError> for BackendError {
    fn from(err: MailError) -> Self {
        Self::internal(format!("Email delivery error: {err}"))
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected JSON body: {}", rejection.body_text());
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::warn!("Rejected multipart body: {}", rejection.body_text());
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        tracing::warn!("Malformed multipart body: {}", err.body_text());
        Self::handler(err.status(), err.body_text())
    }
}
