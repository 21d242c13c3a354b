/**
 * Contact Handler
 *
 * The submission is stored before the relay is consulted, so a message is
 * never lost to an email outage; the caller still sees the 500.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::mail::templates;
use crate::backend::server::state::AppState;
use crate::shared::content::{ContactRequest, ContactSubmission};
use crate::shared::validation::Validate;

pub async fn submit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    request.validate().map_err(|e| {
        tracing::warn!("Contact submission rejected: {}", e);
        e
    })?;
    let submission = request.into_submission();

    let record = state
        .collection::<ContactSubmission>()
        .insert(&submission)
        .await?;
    tracing::info!("Contact submission {} from {}", record.id, submission.full_name());

    let (relay, admin_email) = match (&state.mail, &state.admin_email) {
        (Some(relay), Some(admin_email)) => (relay, admin_email),
        _ => {
            tracing::error!("Contact notification skipped: email relay or admin address missing");
            return Err(BackendError::server("Email configuration error"));
        }
    };

    relay
        .send(templates::contact_notification(&submission, admin_email))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Message received and sent to admin" })),
    ))
}
