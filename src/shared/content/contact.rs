//! Contact form submissions

use serde::{Deserialize, Serialize};

use super::Document;
use crate::shared::error::SharedError;
use crate::shared::validation::{self, Validate};

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// A stored contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Document for ContactSubmission {
    const COLLECTION: &'static str = "contacts";
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// `POST /api/contact` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("firstName", self.first_name.as_deref()),
            ("lastName", self.last_name.as_deref()),
            ("email", self.email.as_deref()),
            ("subject", self.subject.as_deref()),
            ("message", self.message.as_deref()),
        ]
    }

    /// Trimmed submission; call after [`Validate::validate`]
    pub fn into_submission(self) -> ContactSubmission {
        let trim = |v: Option<String>| v.unwrap_or_default().trim().to_string();
        ContactSubmission {
            first_name: trim(self.first_name),
            last_name: trim(self.last_name),
            email: trim(self.email),
            subject: trim(self.subject),
            message: trim(self.message),
        }
    }
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), SharedError> {
        for (field, value) in self.fields() {
            if value.map_or(true, |v| v.trim().is_empty()) {
                return Err(SharedError::validation(field, ALL_FIELDS_REQUIRED));
            }
        }
        validation::email("email", self.email.as_deref().unwrap_or_default().trim())
    }
}
