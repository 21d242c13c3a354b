/**
 * Auth Core
 *
 * Signup, login, admin-quota reporting and bearer-token resolution. The
 * service owns the token codec and password hasher and talks to whichever
 * credential store the server was built with.
 *
 * # Signup
 *
 * 1. Validate the request (first offending field wins)
 * 2. Reject when the username or email is already taken
 * 3. When an admin is requested, reject if the cap is already reached
 * 4. Hash the password on the blocking pool
 * 5. Insert; the store re-checks uniqueness and the cap atomically
 * 6. Issue a token
 *
 * Steps 2 and 3 are fast rejections only. Two requests racing past them are
 * settled by step 5.
 *
 * # Login
 *
 * An unknown email and a wrong password produce the same
 * [`AuthError::InvalidCredentials`].
 */

use std::sync::Arc;

use thiserror::Error;

use crate::backend::auth::handlers::types::{LoginRequest, SignupRequest};
use crate::backend::auth::passwords::{PasswordError, PasswordHasher};
use crate::backend::auth::sessions::{TokenCodec, TokenError};
use crate::backend::auth::users::{CredentialStore, IdentityView, NewIdentity};
use crate::backend::store::StoreError;
use crate::shared::config::AppConfig;
use crate::shared::error::SharedError;
use crate::shared::validation::Validate;

/// Maximum number of simultaneous admin accounts
pub const MAX_ADMINS: i64 = 2;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("Email or username already in use")]
    Conflict,

    #[error("Maximum admin accounts limit reached ({} accounts allowed)", MAX_ADMINS)]
    QuotaExceeded,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No well-formed `Bearer <token>` header
    #[error("Not authorized, no token.")]
    MissingToken,

    #[error("Not authorized, token failed.")]
    TokenFailed(#[source] TokenError),

    /// Token verified but its subject no longer exists
    #[error("User not found, token invalid.")]
    UnknownIdentity,

    #[error("credential store failure: {0}")]
    Store(#[from] StoreError),

    #[error("password hashing failure: {0}")]
    Password(#[from] PasswordError),

    #[error("token issuance failure: {0}")]
    Token(#[from] TokenError),
}

/// An authenticated session: a fresh token plus who it belongs to
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: IdentityView,
}

/// Admin saturation snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCount {
    pub admin_count: i64,
    pub max_admins: i64,
    pub remaining_slots: i64,
}

impl AdminCount {
    fn from_count(admin_count: i64) -> Self {
        Self {
            admin_count,
            max_admins: MAX_ADMINS,
            remaining_slots: (MAX_ADMINS - admin_count).max(0),
        }
    }
}

pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenCodec,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: TokenCodec,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            credentials,
            tokens,
            hasher,
        }
    }

    /// Build the codec and hasher from configuration
    pub fn from_config(credentials: Arc<dyn CredentialStore>, config: &AppConfig) -> Self {
        Self::new(
            credentials,
            TokenCodec::new(&config.jwt_secret, config.token_ttl),
            PasswordHasher::new(config.bcrypt_cost),
        )
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }

    /// Register a new identity and open a session for it
    pub async fn signup(&self, request: &SignupRequest) -> Result<Session, AuthError> {
        request.validate()?;
        let username = request.username.as_deref().unwrap_or_default();
        let email = request.email.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();

        if self
            .credentials
            .find_by_username_or_email(username, email)
            .await?
            .is_some()
        {
            tracing::warn!("Signup rejected, username or email taken: {}", username);
            return Err(AuthError::Conflict);
        }

        if request.is_admin && self.credentials.count_admins().await? >= MAX_ADMINS {
            tracing::warn!("Admin signup rejected, quota reached: {}", username);
            return Err(AuthError::QuotaExceeded);
        }

        let password_hash = self.hasher.hash(password).await?;

        let identity = self
            .credentials
            .insert(
                NewIdentity {
                    username: username.to_owned(),
                    email: email.to_owned(),
                    password_hash,
                    is_admin: request.is_admin,
                },
                MAX_ADMINS,
            )
            .await
            .map_err(|e| match e {
                StoreError::Duplicate => AuthError::Conflict,
                StoreError::AdminQuotaExceeded => AuthError::QuotaExceeded,
                other => AuthError::Store(other),
            })?;

        let token = self.tokens.issue(identity.id)?;
        tracing::info!(
            "Registered {} ({}), admin: {}",
            identity.username,
            identity.id,
            identity.is_admin
        );

        Ok(Session {
            token,
            user: identity.view(),
        })
    }

    /// Verify credentials and open a session
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        request.validate()?;
        let email = request.email.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();

        let Some(identity) = self.credentials.find_by_email(email).await? else {
            tracing::warn!("Login rejected, unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &identity.password_hash).await? {
            tracing::warn!("Login rejected, wrong password for {}", identity.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(identity.id)?;
        tracing::info!("Login successful: {} ({})", identity.username, identity.id);

        Ok(Session {
            token,
            user: identity.view(),
        })
    }

    pub async fn admin_count(&self) -> Result<AdminCount, AuthError> {
        let count = self.credentials.count_admins().await?;
        Ok(AdminCount::from_count(count))
    }

    /// Resolve an `Authorization` header value to a known identity
    pub async fn resolve_bearer(&self, header: Option<&str>) -> Result<IdentityView, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let identity_id = self.tokens.verify(token).map_err(AuthError::TokenFailed)?;

        self.credentials
            .find_view_by_id(identity_id)
            .await?
            .ok_or(AuthError::UnknownIdentity)
    }
}
