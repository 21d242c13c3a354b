//! Test application fixture

use std::sync::Arc;

use axum_test::TestServer;
use foundation_cms::backend::routes::create_router;
use foundation_cms::backend::server::AppState;
use foundation_cms::shared::config::AppConfig;

use super::fakes::{RecordingMailRelay, RecordingMediaHost};

pub const TEST_SECRET: &str = "test-secret-do-not-use";
pub const ADMIN_EMAIL: &str = "admin@foundation.org";

/// Deterministic configuration: fixed secret, cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .build()
        .expect("test config is valid")
}

/// Router on in-memory stores plus handles on the fakes behind it
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub media: Arc<RecordingMediaHost>,
    pub mail: Arc<RecordingMailRelay>,
}

impl TestApp {
    /// Fully configured: media host, email relay and admin address
    pub fn new() -> Self {
        let media = Arc::new(RecordingMediaHost::default());
        let mail = Arc::new(RecordingMailRelay::default());
        let state = AppState::in_memory(test_config())
            .with_media(media.clone())
            .with_mail(mail.clone())
            .with_admin_email(ADMIN_EMAIL);

        Self::from_state(state, media, mail)
    }

    /// No outbound collaborators configured
    pub fn bare() -> Self {
        let state = AppState::in_memory(test_config());
        Self::from_state(
            state,
            Arc::new(RecordingMediaHost::default()),
            Arc::new(RecordingMailRelay::default()),
        )
    }

    fn from_state(
        state: AppState,
        media: Arc<RecordingMediaHost>,
        mail: Arc<RecordingMailRelay>,
    ) -> Self {
        let server = TestServer::new(create_router(state.clone())).expect("test server starts");
        Self {
            server,
            state,
            media,
            mail,
        }
    }
}
