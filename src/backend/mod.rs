//! Backend Module
//!
//! All server-side code: an Axum HTTP server exposing the foundation site's
//! JSON API.
//!
//! # Architecture
//!
//! - **`server`** - Application state and initialization
//! - **`routes`** - Route configuration and middleware stack
//! - **`auth`** - Identities, passwords, tokens and the auth core
//! - **`middleware`** - Bearer-token guard
//! - **`content`** - Generic CRUD for blogs, events and projects
//! - **`newsletter`** - Subscriptions and bulk sends
//! - **`contact`** - Contact form
//! - **`store`** - Document store (Postgres or in-memory)
//! - **`media`** - Media host client (Cloudinary)
//! - **`mail`** - Email relay client (SendGrid) and templates
//! - **`extract`** - Request extractors with JSON rejections
//! - **`error`** - HTTP-facing error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── content/        - Content CRUD handlers
//! ├── newsletter/     - Newsletter handlers
//! ├── contact/        - Contact handler
//! ├── store/          - Document persistence
//! ├── media/          - Media host
//! ├── mail/           - Email relay
//! ├── extract/        - Extractors
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds every service behind an `Arc<dyn Trait>`, so the same
//! router runs on Postgres in production and on in-memory stores with
//! recording fakes in tests.

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and identities
pub mod auth;

/// Request middleware
pub mod middleware;

/// Content CRUD
pub mod content;

/// Newsletter subscriptions and sends
pub mod newsletter;

/// Contact form
pub mod contact;

/// Document persistence
pub mod store;

/// Media host client
pub mod media;

/// Email relay client
pub mod mail;

/// Request extractors
pub mod extract;

/// Backend-specific error types
pub mod error;
