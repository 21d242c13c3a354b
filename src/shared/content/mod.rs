//! Site content documents
//!
//! Everything the site publishes or collects (blog posts, events, projects,
//! newsletter subscribers, contact submissions) is a JSON document stored in
//! a named collection. This module holds the document shapes and the rules
//! for building them from submitted form fields; persistence lives in
//! `backend::store`.
//!
//! # Wire format
//!
//! Stored documents are wrapped in a [`Record`] that adds `_id`, `createdAt`
//! and `updatedAt`, all serialized in camelCase next to the document fields.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::validation::required;

pub mod blog;
pub mod contact;
pub mod event;
pub mod project;
pub mod subscriber;

pub use blog::Blog;
pub use contact::{ContactRequest, ContactSubmission};
pub use event::Event;
pub use project::Project;
pub use subscriber::{NewsletterIssue, SubscribeRequest, Subscriber};

/// Text fields submitted with a form (multipart or JSON)
pub type FormFields = BTreeMap<String, String>;

/// Coarse classification of an uploaded media file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Map a media host resource type onto the two kinds the site shows
    pub fn from_resource_type(resource_type: &str) -> Self {
        if resource_type.eq_ignore_ascii_case("video") {
            Self::Video
        } else {
            Self::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// A file stored by the media host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    /// Public HTTPS URL
    pub url: String,
    pub kind: MediaKind,
    /// Host-side identifier, needed to delete the asset again
    pub public_id: String,
}

/// A stored document together with its storage metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub document: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A document type with its own collection
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name in the document store
    const COLLECTION: &'static str;

    /// Field whose value must be unique across the collection
    const UNIQUE_FIELD: Option<&'static str> = None;

    /// List order; newest first unless a kind says otherwise
    fn compare(a: &Record<Self>, b: &Record<Self>) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/// Publishable content managed through the CRUD endpoints
pub trait ContentDocument: Document {
    /// Human label used in messages ("Blog created", "Blog not found")
    const LABEL: &'static str;

    /// Response key wrapping a single record (`{"blog": {...}}`)
    const KEY: &'static str;

    /// Build a new document, checking required fields
    fn from_fields(fields: &FormFields) -> Result<Self, SharedError>;

    /// Build a partial update containing only the submitted fields
    fn patch_from_fields(fields: &FormFields) -> Result<Map<String, Value>, SharedError>;

    /// Point the document at an uploaded media file
    fn attach_media(&mut self, media: &MediaAsset);
}

/// Patch fragment recording an uploaded media file
pub fn media_patch(media: &MediaAsset) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert("mediaUrl".into(), Value::String(media.url.clone()));
    patch.insert("mediaType".into(), Value::String(media.kind.as_str().into()));
    patch
}

/// Read a required text field
pub(crate) fn required_field(fields: &FormFields, name: &str) -> Result<String, SharedError> {
    required(name, fields.get(name).map(String::as_str)).map(|v| v.trim().to_string())
}

/// Copy an optional text field into a patch, rejecting empty values
pub(crate) fn patch_text(
    fields: &FormFields,
    name: &str,
    patch: &mut Map<String, Value>,
) -> Result<(), SharedError> {
    if fields.contains_key(name) {
        let value = required_field(fields, name)?;
        patch.insert(name.to_string(), Value::String(value));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_media_kind_mapping() {
        assert_eq!(MediaKind::from_resource_type("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_resource_type("image"), MediaKind::Image);
        assert_eq!(MediaKind::from_resource_type("raw"), MediaKind::Image);
    }

    #[test]
    fn test_record_wire_format() {
        let now = Utc::now();
        let record = Record {
            id: Uuid::nil(),
            document: Blog {
                title: "Hello".into(),
                content: "World".into(),
                media_url: None,
                media_type: MediaKind::Image,
            },
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], Uuid::nil().to_string());
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["mediaType"], "image");
        assert!(json.get("mediaUrl").is_none());
        assert!(json.get("createdAt").is_some());

        let back: Record<Blog> = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_patch_text_rejects_empty() {
        let mut patch = Map::new();
        let err = patch_text(&fields(&[("title", "")]), "title", &mut patch).unwrap_err();
        assert_eq!(err.to_string(), "\"title\" is not allowed to be empty");

        patch_text(&fields(&[]), "title", &mut patch).unwrap();
        assert!(patch.is_empty());
    }
}
