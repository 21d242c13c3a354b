//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs             - Module exports and documentation
//! ├── router.rs          - Router assembly and middleware stack
//! ├── api_routes.rs      - Auth, newsletter and contact endpoints
//! └── content_routes.rs  - Blog, event and project resources
//! ```
//!
//! Reads are public. Every write to content and the newsletter send sit
//! behind the bearer-token guard, as does `GET /api/auth/me`.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Content resource routes
pub mod content_routes;

pub use router::create_router;
