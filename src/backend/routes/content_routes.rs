/**
 * Content Route Handlers
 *
 * One resource per content kind, mounted at `/api/<collection>`:
 *
 * - `GET /api/blogs`, `GET /api/blogs/{id}` - public
 * - `POST /api/blogs`, `PUT /api/blogs/{id}`, `DELETE /api/blogs/{id}` - guarded
 *
 * and likewise for `events` and `projects`.
 */

use axum::{
    middleware,
    routing::{post, put},
    Router,
};

use crate::backend::content::{create, list, remove, show, update};
use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;
use crate::shared::content::{Blog, ContentDocument, Event, Project};

/// Configure content routes for every content kind
pub fn configure_content_routes(
    router: Router<AppState>,
    app_state: &AppState,
) -> Router<AppState> {
    let router = content_resource::<Blog>(router, app_state);
    let router = content_resource::<Event>(router, app_state);
    content_resource::<Project>(router, app_state)
}

/// Mount the five CRUD routes for one kind
///
/// `route_layer` on a method router wraps only the methods registered
/// before it: the writes are guarded, the reads chained after stay public.
fn content_resource<T: ContentDocument>(
    router: Router<AppState>,
    app_state: &AppState,
) -> Router<AppState> {
    let collection_path = format!("/api/{}", T::COLLECTION);
    let item_path = format!("/api/{}/{{id}}", T::COLLECTION);

    router
        .route(
            &collection_path,
            post(create::<T>)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), require_auth))
                .get(list::<T>),
        )
        .route(
            &item_path,
            put(update::<T>)
                .delete(remove::<T>)
                .route_layer(middleware::from_fn_with_state(app_state.clone(), require_auth))
                .get(show::<T>),
        )
}
