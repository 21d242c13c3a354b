//! Media Host
//!
//! Uploaded images and videos are not stored by this server. They are
//! forwarded to a media host, and documents keep only the returned public
//! URL and a coarse kind.
//!
//! - **`cloudinary`** - `CloudinaryClient`, the production [`MediaHost`]

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::extract::UploadedFile;
use crate::shared::content::{MediaAsset, MediaKind};

pub mod cloudinary;

pub use cloudinary::CloudinaryClient;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media host returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected media host response: {0}")]
    InvalidResponse(String),
}

/// Stores files and hands back public URLs
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<MediaAsset, MediaError>;

    /// Remove a previously uploaded asset of the given kind
    async fn destroy(&self, public_id: &str, kind: MediaKind) -> Result<(), MediaError>;
}
