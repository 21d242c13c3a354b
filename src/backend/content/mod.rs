//! Content Module
//!
//! CRUD endpoints for the publishable document kinds (blogs, events,
//! projects). One set of generic handlers serves every kind; the kind's
//! [`ContentDocument`](crate::shared::content::ContentDocument) impl supplies
//! its label, response key, validation and list order.
//!
//! # Endpoints (per kind `k`)
//!
//! - `GET /api/<k>s` - list
//! - `GET /api/<k>s/{id}` - show
//! - `POST /api/<k>s` - create (guarded)
//! - `PUT /api/<k>s/{id}` - partial update (guarded)
//! - `DELETE /api/<k>s/{id}` - remove (guarded)

pub mod handlers;

use crate::backend::error::BackendError;
use crate::backend::extract::UploadedFile;
use crate::backend::server::state::AppState;
use crate::shared::content::MediaAsset;

pub use handlers::{create, list, remove, show, update};

/// Forward an optional uploaded file to the media host
pub(crate) async fn upload_attachment(
    state: &AppState,
    file: Option<UploadedFile>,
) -> Result<Option<MediaAsset>, BackendError> {
    let Some(file) = file else {
        return Ok(None);
    };

    let host = state
        .media
        .as_ref()
        .ok_or_else(|| BackendError::internal("File received but no media host is configured"))?;

    let asset = host.upload(file).await?;
    tracing::info!("Uploaded {} asset {}", asset.kind.as_str(), asset.public_id);
    Ok(Some(asset))
}
