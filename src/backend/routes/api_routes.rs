/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - Registration
 * - `POST /api/auth/login` - Login
 * - `GET /api/auth/admin-count` - Admin quota report
 * - `GET /api/auth/me` - Current identity (requires authentication)
 *
 * ## Newsletter
 * - `POST /api/newsletter/subscribe` - Public sign-up
 * - `POST /api/newsletter/send` - Bulk send (requires authentication)
 *
 * ## Contact
 * - `POST /api/contact` - Public contact form
 */

use axum::{middleware, Router};

use crate::backend::auth::{admin_count, get_me, login, signup};
use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;
use crate::backend::{contact, newsletter};

/// Configure API routes
///
/// Guarded routes carry `require_auth` as a route layer, so it runs only
/// for requests that matched them.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let guard = middleware::from_fn_with_state(app_state.clone(), require_auth);

    router
        // Authentication endpoints
        .route("/api/auth/signup", axum::routing::post(signup))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/admin-count", axum::routing::get(admin_count))
        .route(
            "/api/auth/me",
            axum::routing::get(get_me).route_layer(guard.clone()),
        )
        // Newsletter endpoints
        .route(
            "/api/newsletter/subscribe",
            axum::routing::post(newsletter::subscribe),
        )
        .route(
            "/api/newsletter/send",
            axum::routing::post(newsletter::send).route_layer(guard),
        )
        // Contact endpoint
        .route("/api/contact", axum::routing::post(contact::submit))
}
