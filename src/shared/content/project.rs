//! Foundation projects

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    patch_text, required_field, ContentDocument, Document, FormFields, MediaAsset, MediaKind,
};
use crate::shared::error::SharedError;

/// A project the foundation runs or supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: MediaKind,
}

impl Document for Project {
    const COLLECTION: &'static str = "projects";
}

impl ContentDocument for Project {
    const LABEL: &'static str = "Project";
    const KEY: &'static str = "project";

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
