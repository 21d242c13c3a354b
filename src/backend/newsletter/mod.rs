//! Newsletter Module
//!
//! - `POST /api/newsletter/subscribe` - public sign-up with a welcome email
//! - `POST /api/newsletter/send` - guarded bulk send to every subscriber

pub mod handlers;

pub use handlers::{send, subscribe};
