/**
 * Content Handlers
 *
 * Generic CRUD over any `ContentDocument`. Routes instantiate these with a
 * concrete kind, e.g. `get(list::<Blog>)`.
 *
 * Responses wrap single records under the kind's key:
 *
 * ```json
 * { "message": "Blog created", "blog": { "_id": "...", "title": "..." } }
 * ```
 *
 * An id that does not parse as a UUID cannot name a stored record, so it is
 * reported as not found.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::backend::content::upload_attachment;
use crate::backend::error::BackendError;
use crate::backend::extract::ContentForm;
use crate::backend::server::state::AppState;
use crate::shared::content::{media_patch, ContentDocument, Record};
use crate::shared::error::SharedError;

fn not_found<T: ContentDocument>() -> BackendError {
    BackendError::not_found(format!("{} not found", T::LABEL))
}

fn parse_id<T: ContentDocument>(id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(id).map_err(|_| not_found::<T>())
}

/// `{message, <key>: record}`
fn record_body<T: ContentDocument>(
    message: String,
    record: &Record<T>,
) -> Result<Value, BackendError> {
    let record = serde_json::to_value(record).map_err(SharedError::from)?;

    let mut body = Map::new();
    body.insert("message".into(), Value::String(message));
    body.insert(T::KEY.into(), record);
    Ok(Value::Object(body))
}

/// List all records of a kind in its display order
pub async fn list<T: ContentDocument>(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record<T>>>, BackendError> {
    let records = state.collection::<T>().list().await?;
    Ok(Json(records))
}

pub async fn show<T: ContentDocument>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<T>>, BackendError> {
    let id = parse_id::<T>(&id)?;
    state
        .collection::<T>()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(not_found::<T>)
}

/// Create a record
///
/// Required fields are checked before any file is uploaded, so a rejected
/// request never leaves an orphaned asset on the media host.
pub async fn create<T: ContentDocument>(
    State(state): State<AppState>,
    form: ContentForm,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    let mut document = T::from_fields(&form.fields).map_err(|e| {
        tracing::warn!("{} create rejected: {}", T::LABEL, e);
        e
    })?;

    if let Some(asset) = upload_attachment(&state, form.file).await? {
        document.attach_media(&asset);
    }

    let record = state.collection::<T>().insert(&document).await?;
    tracing::info!("{} created: {}", T::LABEL, record.id);

    let body = record_body(format!("{} created", T::LABEL), &record)?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// Apply a partial update
///
/// Only submitted fields change. A new file replaces the media fields.
pub async fn update<T: ContentDocument>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ContentForm,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id::<T>(&id)?;
    let collection = state.collection::<T>();

    let mut patch = T::patch_from_fields(&form.fields).map_err(|e| {
        tracing::warn!("{} update rejected: {}", T::LABEL, e);
        e
    })?;

    if collection.get(id).await?.is_none() {
        return Err(not_found::<T>());
    }

    if let Some(asset) = upload_attachment(&state, form.file).await? {
        patch.extend(media_patch(&asset));
    }

    let record = collection.update(id, patch).await?.ok_or_else(not_found::<T>)?;
    tracing::info!("{} updated: {}", T::LABEL, record.id);

    Ok(Json(record_body(format!("{} updated", T::LABEL), &record)?))
}

pub async fn remove<T: ContentDocument>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id::<T>(&id)?;

    if !state.collection::<T>().remove(id).await? {
        return Err(not_found::<T>());
    }
    tracing::info!("{} deleted: {}", T::LABEL, id);

    Ok(Json(serde_json::json!({ "message": format!("{} deleted", T::LABEL) })))
}
