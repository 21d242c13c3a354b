//! Server Module
//!
//! Server initialization and state.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database connection and migrations
//! └── init.rs         - State construction and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Storage**: Postgres when `DATABASE_URL` is set, in-memory otherwise
//! 2. **Collaborators**: Cloudinary and SendGrid when configured
//! 3. **Router Creation**: Routes, guard and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use foundation_cms::backend::server::create_app;
//! use foundation_cms::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{build_state, create_app};
pub use state::AppState;
