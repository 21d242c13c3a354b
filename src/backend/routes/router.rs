/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router and wraps
 * it in the shared middleware stack.
 *
 * # Route Order
 *
 * 1. API routes (auth, newsletter, contact)
 * 2. Content routes (blogs, events, projects)
 * 3. Fallback handler (JSON 404)
 *
 * # Middleware
 *
 * - Request body limit from `AppConfig::max_upload_bytes`
 * - Security headers on every response
 * - CORS for the configured origin (`*` allows any)
 * - Request tracing spans
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::content_routes::configure_content_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config.cors_origin);
    let body_limit = DefaultBodyLimit::max(app_state.config.max_upload_bytes);

    let router = Router::new();

    // Add API routes
    let router = configure_api_routes(router, &app_state);

    // Add content routes
    let router = configure_content_routes(router, &app_state);

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::not_found("Route not found") });

    router
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors)
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(body_limit),
        )
        .with_state(app_state)
}

/// CORS policy for the configured origin
fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(origin.trim()) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                tracing::warn!("Invalid CORS_ORIGIN {:?} ({}); allowing any origin", origin, e);
                AllowOrigin::from(Any)
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
