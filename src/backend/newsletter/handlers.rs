/**
 * Newsletter Handlers
 *
 * # Subscribe
 *
 * 1. Validate and normalize the address
 * 2. Reject an existing subscriber (409)
 * 3. Persist; the store's unique index settles concurrent duplicates
 * 4. Send the welcome email when a relay is configured
 *
 * The subscription stands even if the welcome email fails: a retry would
 * only hit the duplicate check.
 *
 * # Send
 *
 * Uploads the optional attachment, then sends one copy per subscriber.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::backend::content::upload_attachment;
use crate::backend::error::BackendError;
use crate::backend::extract::{ApiJson, ContentForm};
use crate::backend::mail::templates;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::content::{NewsletterIssue, SubscribeRequest, Subscriber};
use crate::shared::validation::Validate;

const ALREADY_SUBSCRIBED: &str = "Already subscribed";
const EMAIL_CONFIGURATION_ERROR: &str = "Email configuration error";

pub async fn subscribe(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    request.validate()?;
    let subscriber = request.into_subscriber();
    let subscribers = state.collection::<Subscriber>();

    if subscribers.find_by("email", &subscriber.email).await?.is_some() {
        tracing::warn!("Duplicate subscription attempt: {}", subscriber.email);
        return Err(BackendError::conflict(ALREADY_SUBSCRIBED));
    }

    subscribers.insert(&subscriber).await.map_err(|e| match e {
        StoreError::Duplicate => BackendError::conflict(ALREADY_SUBSCRIBED),
        other => other.into(),
    })?;
    tracing::info!("New subscriber: {}", subscriber.email);

    match &state.mail {
        Some(relay) => {
            if let Err(e) = relay.send(templates::welcome(&subscriber.email)).await {
                tracing::error!("Failed to send welcome email to {}: {}", subscriber.email, e);
            }
        }
        None => tracing::warn!("Email relay not configured; skipping welcome email"),
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Subscribed successfully" })),
    ))
}

pub async fn send(
    State(state): State<AppState>,
    form: ContentForm,
) -> Result<Json<Value>, BackendError> {
    let issue = NewsletterIssue::from_fields(&form.fields)?;

    let recipients: Vec<String> = state
        .collection::<Subscriber>()
        .list()
        .await?
        .into_iter()
        .map(|record| record.document.email)
        .collect();

    if recipients.is_empty() {
        return Err(BackendError::bad_request("No subscribers found"));
    }

    let relay = state.mail.clone().ok_or_else(|| {
        tracing::error!("Newsletter send requested but the email relay is not configured");
        BackendError::server(EMAIL_CONFIGURATION_ERROR)
    })?;

    let attachment = upload_attachment(&state, form.file).await?;
    let count = recipients.len();

    relay
        .send_bulk(templates::newsletter(&issue, attachment.as_ref(), recipients))
        .await?;
    tracing::info!("Newsletter \"{}\" sent to {} subscribers", issue.title, count);

    Ok(Json(json!({ "message": "Newsletter sent successfully" })))
}
