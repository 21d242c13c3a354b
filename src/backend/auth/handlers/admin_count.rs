//! GET /api/auth/admin-count
//!
//! Public. Reports how many admin slots are taken.

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::AdminCountResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

pub async fn admin_count(
    State(auth): State<Arc<AuthService>>,
) -> Result<Json<AdminCountResponse>, BackendError> {
    let count = auth.admin_count().await?;
    Ok(Json(count.into()))
}
