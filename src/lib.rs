//! Foundation CMS - Main Library
//!
//! Content-management backend for a nonprofit foundation's web site: blog
//! posts, events, projects, newsletter subscribers and contact-form
//! submissions, with username/password accounts and bearer tokens gating
//! every write.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP or database dependency
//!   - Content documents and request models
//!   - Validation rules and shared error types
//!   - Application configuration
//!
//! - **`backend`** - Axum server
//!   - Auth core: credential store, token codec, password hasher, access guard
//!   - Document store (Postgres or in-memory)
//!   - Media host (Cloudinary) and email relay (SendGrid) clients
//!   - Routes, extractors and error responses
//!
//! # Usage
//!
//! ```rust,no_run
//! use foundation_cms::backend::server::init::create_app;
//! use foundation_cms::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for input problems
//! - Per-layer `thiserror` enums in the backend (`StoreError`, `AuthError`, ...)
//! - `backend::error::BackendError` turns all of them into JSON responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
