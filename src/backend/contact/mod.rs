//! Contact Module
//!
//! `POST /api/contact`: persist a contact-form submission and notify the
//! site admin by email.

pub mod handlers;

pub use handlers::submit;
