//! JSON body extractor
//!
//! Axum's own `Json` rejects with plain-text bodies. `ApiJson` reuses its
//! parsing but rejects with a JSON `BackendError` (400 for malformed input).

use axum::extract::FromRequest;

use crate::backend::error::BackendError;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);
