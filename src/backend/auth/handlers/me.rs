/**
 * Get Current User Handler
 *
 * GET /api/auth/me
 *
 * Sits behind the auth guard, which has already resolved the bearer token.
 * Returns the identity's public view (never the password hash).
 *
 * # Example Response
 *
 * ```json
 * {
 *   "id": "123e4567-e89b-12d3-a456-426614174000",
 *   "username": "ana",
 *   "email": "ana@x.com",
 *   "isAdmin": true
 * }
 * ```
 */

use axum::response::Json;

use crate::backend::auth::users::IdentityView;
use crate::backend::middleware::AuthUser;

pub async fn get_me(AuthUser(identity): AuthUser) -> Json<IdentityView> {
    Json(identity)
}
