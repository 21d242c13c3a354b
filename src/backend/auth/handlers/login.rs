/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * An unknown email and a wrong password are indistinguishable to the caller:
 * both return 401 with the same body.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - first invalid field
/// * `401 Unauthorized` - "Invalid email or password"
/// * `500 Internal Server Error` - store or hashing failure
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let session = auth.login(&request).await?;
    Ok(Json(AuthResponse::new("Login successful", session)))
}
