//! Blog posts

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    patch_text, required_field, ContentDocument, Document, FormFields, MediaAsset, MediaKind,
};
use crate::shared::error::SharedError;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: MediaKind,
}

impl Document for Blog {
    const COLLECTION: &'static str = "blogs";
}

impl ContentDocument for Blog {
    const LABEL: &'static str = "Blog";
    const KEY: &'static str = "blog";

    fn from_fields(fields: &FormFields) -> Result<Self, SharedError> {
        Ok(Self {
            title: required_field(fields, "title")?,
            content: required_field(fields, "content")?,
            media_url: None,
            media_type: MediaKind::default(),
        })
    }

    fn patch_from_fields(fields: &FormFields) -> Result<Map<String, Value>, SharedError> {
        let mut patch = Map::new();
        patch_text(fields, "title", &mut patch)?;
        patch_text(fields, "content", &mut patch)?;
        Ok(patch)
    }

    fn attach_media(&mut self, media: &MediaAsset) {
        self.media_url = Some(media.url.clone());
        self.media_type = media.kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::content::fields;

    #[test]
    fn test_from_fields_requires_title_then_content() {
        let err = Blog::from_fields(&fields(&[("content", "body")])).unwrap_err();
        assert_eq!(err.field(), Some("title"));

        let err = Blog::from_fields(&fields(&[("title", "Hi")])).unwrap_err();
        assert_eq!(err.field(), Some("content"));
    }

    #[test]
    fn test_attach_media() {
        let mut blog = Blog::from_fields(&fields(&[("title", "Hi"), ("content", "x")])).unwrap();
        blog.attach_media(&MediaAsset {
            url: "https://cdn/v.mp4".into(),
            kind: MediaKind::Video,
            public_id: "v".into(),
        });
        assert_eq!(blog.media_url.as_deref(), Some("https://cdn/v.mp4"));
        assert_eq!(blog.media_type, MediaKind::Video);
    }
}
