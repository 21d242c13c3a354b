//! Email Relay
//!
//! Outbound email goes through a transactional email provider. Handlers
//! build a [`MailMessage`] from a template and hand it to a [`MailRelay`];
//! the relay supplies the configured sender.
//!
//! - **`sendgrid`** - `SendGridClient`, the production relay
//! - **`templates`** - HTML bodies, with all user text escaped

use async_trait::async_trait;
use thiserror::Error;

pub mod sendgrid;
pub mod templates;

pub use sendgrid::SendGridClient;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email relay returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// A message ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            reply_to: None,
            subject: subject.into(),
            html: html.into(),
        }
    }

    /// Same message addressed to many recipients
    pub fn to_many(to: Vec<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to,
            reply_to: None,
            subject: subject.into(),
            html: html.into(),
        }
    }

    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }
}

#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Send one message; every recipient sees the full recipient list
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;

    /// Send one copy per recipient; recipients never see each other
    async fn send_bulk(&self, message: MailMessage) -> Result<(), MailError>;
}
