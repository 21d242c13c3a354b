//! Common test utilities and helpers
//!
//! - `app` - test configuration and a `TestServer` on in-memory stores
//! - `fakes` - recording media host and email relay
//! - `auth_helpers` - signup/login shortcuts and bearer headers
//! - `database` - PostgreSQL fixtures behind `TEST_DATABASE_URL`

#![allow(dead_code)]

pub mod app;
pub mod auth_helpers;
pub mod database;
pub mod fakes;

pub use app::*;
pub use auth_helpers::*;
pub use fakes::*;
