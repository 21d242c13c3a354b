//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token guard for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use foundation_cms::backend::middleware::require_auth;
//! use foundation_cms::backend::server::AppState;
//!
//! # fn example(state: AppState) -> Router<AppState> {
//! Router::new()
//!     .route("/api/auth/me", get(|| async { "ok" }))
//!     .route_layer(middleware::from_fn_with_state(state, require_auth))
//! # }
//! ```

pub mod auth;

pub use auth::{require_auth, AuthUser, AuthenticatedUser};
