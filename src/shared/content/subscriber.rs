//! Newsletter subscribers and issues

use serde::{Deserialize, Serialize};

use super::{required_field, Document, FormFields};
use crate::shared::error::SharedError;
use crate::shared::validation::{self, Validate};

/// A newsletter subscriber; one document per address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
}

impl Document for Subscriber {
    const COLLECTION: &'static str = "subscribers";
    const UNIQUE_FIELD: Option<&'static str> = Some("email");
}

/// `POST /api/newsletter/subscribe` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

impl Validate for SubscribeRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| SharedError::validation("email", "Email is required"))?;
        validation::email("email", email)
    }
}

impl SubscribeRequest {
    /// Normalized subscriber document; call after [`Validate::validate`]
    pub fn into_subscriber(self) -> Subscriber {
        Subscriber {
            email: self.email.unwrap_or_default().trim().to_lowercase(),
        }
    }
}

/// A newsletter issue to send to every subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterIssue {
    pub title: String,
    pub content: String,
}

impl NewsletterIssue {
    pub fn from_fields(fields: &FormFields) -> Result<Self, SharedError> {
        Ok(Self {
            title: required_field(fields, "title")?,
            content: required_field(fields, "content")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::content::fields;

    #[test]
    fn test_subscribe_requires_email() {
        let err = SubscribeRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = SubscribeRequest { email: Some("  ".into()) }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_subscribe_normalizes_address() {
        let request = SubscribeRequest { email: Some(" Ana@X.com ".into()) };
        request.validate().unwrap();
        assert_eq!(request.into_subscriber().email, "ana@x.com");
    }

    #[test]
    fn test_issue_requires_title() {
        let err = NewsletterIssue::from_fields(&fields(&[("content", "c")])).unwrap_err();
        assert_eq!(err.field(), Some("title"));
    }
}
