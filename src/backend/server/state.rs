/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. Auth
 * handlers take just the auth core through `FromRef`; the rest take the
 * whole state.
 *
 * # Services
 *
 * - `auth` - the auth core (credential store, token codec, hasher)
 * - `documents` - the document store backing every content collection
 * - `media` / `mail` - outbound collaborators, `None` when not configured
 *
 * Every service sits behind an `Arc<dyn Trait>` so the server can run on
 * Postgres or in memory, and tests can swap in recording fakes.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::{CredentialStore, MemoryCredentialStore};
use crate::backend::mail::MailRelay;
use crate::backend::media::MediaHost;
use crate::backend::store::{Collection, DocumentStore, MemoryDocumentStore};
use crate::shared::config::AppConfig;
use crate::shared::content::Document;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub documents: Arc<dyn DocumentStore>,
    /// Media host for uploads; uploads fail with 500 when `None`
    pub media: Option<Arc<dyn MediaHost>>,
    /// Email relay; see the newsletter and contact handlers for fallbacks
    pub mail: Option<Arc<dyn MailRelay>>,
    /// Recipient of contact-form notifications
    pub admin_email: Option<String>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        let auth = Arc::new(AuthService::from_config(credentials, &config));
        let admin_email = config.mail.as_ref().and_then(|m| m.admin_email.clone());

        Self {
            auth,
            documents,
            media: None,
            mail: None,
            admin_email,
            config: Arc::new(config),
        }
    }

    /// State backed entirely by in-memory stores
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryDocumentStore::new()),
        )
    }

    pub fn with_media(mut self, media: Arc<dyn MediaHost>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_mail(mut self, mail: Arc<dyn MailRelay>) -> Self {
        self.mail = Some(mail);
        self
    }

    pub fn with_admin_email(mut self, admin_email: impl Into<String>) -> Self {
        self.admin_email = Some(admin_email.into());
        self
    }

    /// Typed access to one collection
    pub fn collection<T: Document>(&self) -> Collection<T> {
        Collection::new(self.documents.clone())
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
