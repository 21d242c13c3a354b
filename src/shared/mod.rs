//! Shared Module
//!
//! Types used by both the HTTP layer and the stores: content documents,
//! request validation, shared errors and configuration. Nothing in here
//! touches the network or a database.

/// Shared error types
pub mod error;

/// Request validation rules
pub mod validation;

/// Application configuration
pub mod config;

/// Content documents and request models
pub mod content;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use validation::Validate;
