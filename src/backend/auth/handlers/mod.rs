//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Module exports and documentation
//! ├── types.rs        - Request and response types
//! ├── signup.rs       - Registration handler
//! ├── login.rs        - Authentication handler
//! ├── admin_count.rs  - Admin quota report
//! └── me.rs           - Current identity handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`admin_count`** - GET /api/auth/admin-count
//! - **`get_me`** - GET /api/auth/me (guarded)

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Admin quota handler
pub mod admin_count;

/// Get current user handler
pub mod me;

pub use types::{AdminCountResponse, AuthResponse, LoginRequest, SignupRequest};

pub use admin_count::admin_count;
pub use login::login;
pub use me::get_me;
pub use signup::signup;
