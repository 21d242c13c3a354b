//! Authentication Module
//!
//! Identity registration, login, the admin quota and bearer-token sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Identity model and credential stores
//! ├── passwords.rs    - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - Token issue and verification
//! ├── service.rs      - Signup, login and bearer resolution
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email, password → identity created → token returned
//! 2. **Login**: email, password → credentials verified → token returned
//! 3. **Guard**: `Authorization: Bearer <token>` → token verified → identity attached
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Tokens are HS256 and expire after 30 days by default
//! - At most two admin identities exist at any time
//! - Invalid credentials return 401 without revealing which part was wrong

/// Identity model and credential stores
pub mod users;

/// Password hashing
pub mod passwords;

/// Token generation and validation
pub mod sessions;

/// Auth core
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{admin_count, get_me, login, signup};
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use service::{AuthError, AuthService, MAX_ADMINS};
pub use users::{CredentialStore, IdentityView};
