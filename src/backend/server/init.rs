/**
 * Server Initialization
 *
 * Builds `AppState` from configuration and wraps it in the router.
 *
 * # Initialization Process
 *
 * 1. Connect PostgreSQL and run migrations, or fall back to in-memory stores
 * 2. Build the auth core from the configured secret, cost and TTL
 * 3. Attach the media host and email relay when their credentials are present
 * 4. Create the router with all routes and middleware
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::users::PgCredentialStore;
use crate::backend::mail::SendGridClient;
use crate::backend::media::CloudinaryClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::store::PgDocumentStore;
use crate::shared::config::AppConfig;

/// Build the application state for `config`
pub async fn build_state(config: AppConfig) -> Result<AppState, sqlx::Error> {
    let media = config.media.clone();
    let mail = config.mail.clone();

    let mut state = match config.database_url.clone() {
        Some(url) => {
            let pool = load_database(&url).await?;
            AppState::new(
                config,
                Arc::new(PgCredentialStore::new(pool.clone())),
                Arc::new(PgDocumentStore::new(pool)),
            )
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set. Using in-memory stores; data is lost on restart."
            );
            AppState::in_memory(config)
        }
    };

    match media {
        Some(media) => {
            tracing::info!("Media uploads enabled (cloud: {})", media.cloud_name);
            state = state.with_media(Arc::new(CloudinaryClient::new(media)));
        }
        None => tracing::warn!("Cloudinary not configured. File uploads will fail."),
    }

    match mail {
        Some(mail) => {
            tracing::info!("Email relay enabled (sender: {})", mail.from_email);
            state = state.with_mail(Arc::new(SendGridClient::new(mail)));
        }
        None => tracing::warn!("SendGrid not configured. Outbound email is disabled."),
    }

    Ok(state)
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing foundation CMS backend");

    let state = build_state(config).await?;
    let app = create_router(state);

    tracing::info!("Router configured");
    Ok(app)
}
