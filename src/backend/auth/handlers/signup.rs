/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Reject duplicates and, for admin requests, a full admin quota
 * 3. Hash the password and create the identity
 * 4. Return a token and the public view of the new identity
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - first invalid field
/// * `409 Conflict` - username or email already in use
/// * `403 Forbidden` - admin requested while the quota is full
/// * `500 Internal Server Error` - store, hashing or signing failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "ana",
///   "email": "ana@x.com",
///   "password": "secret1",
///   "isAdmin": true
/// }
/// ```
pub async fn signup(
    State(auth): State<Arc<AuthService>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!(
        "Signup request for username: {:?}, admin: {}",
        request.username,
        request.is_admin
    );

    let session = auth.signup(&request).await?;

    let message = if session.user.is_admin {
        "Admin registered successfully"
    } else {
        "User registered successfully"
    };

    Ok((StatusCode::CREATED, Json(AuthResponse::new(message, session))))
}
