/**
 * Authentication Middleware
 *
 * Guards mutating content routes and `/api/auth/me`. The bearer token from
 * the `Authorization` header is verified, its subject looked up, and the
 * identity attached to the request extensions for handlers.
 *
 * Failures short-circuit with 401 and one of three messages: no token, token
 * failed, or user not found. A store failure during lookup is a 500.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::service::AuthError;
use crate::backend::auth::users::IdentityView;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Identity resolved by [`require_auth`]
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub IdentityView);

/// Authentication middleware
///
/// Install with `middleware::from_fn_with_state(state, require_auth)` as a
/// route layer.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity = app_state.auth.resolve_bearer(header).await.map_err(|e| {
        tracing::warn!("Auth guard rejected {}: {}", request.uri().path(), e);
        BackendError::from(e)
    })?;

    request.extensions_mut().insert(AuthenticatedUser(identity));
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated identity
///
/// Only valid on routes behind [`require_auth`]; elsewhere it rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub IdentityView);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|user| AuthUser(user.0.clone()))
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::from(AuthError::MissingToken)
            })
    }
}
