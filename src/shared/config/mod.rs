//! Application configuration module
//!
//! All process-wide settings (signing secret, hashing cost, storage and
//! collaborator credentials) live in one [`AppConfig`] that is built once at
//! startup and handed to constructors. Nothing reads the environment after
//! the config has been built, so tests can inject deterministic values
//! through [`AppConfigBuilder`].

use std::fmt;

use chrono::Duration;
use thiserror::Error;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Default session token validity, in days
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Longest accepted token lifetime
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit (covers media uploads)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Default sender display name for outbound email
pub const DEFAULT_FROM_NAME: &str = "Orphanage Foundation";

const DEFAULT_CLOUDINARY_BASE: &str = "https://api.cloudinary.com";
const DEFAULT_SENDGRID_BASE: &str = "https://api.sendgrid.com";

/// A string that never shows up in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Media host (Cloudinary) credentials
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret,
    /// API origin, overridable for tests
    pub api_base: String,
}

impl MediaConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: Secret::new(api_secret),
            api_base: DEFAULT_CLOUDINARY_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Email relay (SendGrid) credentials and sender identity
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: Secret,
    /// Verified sender address
    pub from_email: String,
    pub from_name: String,
    /// Recipient of contact-form notifications
    pub admin_email: Option<String>,
    /// API origin, overridable for tests
    pub api_base: String,
}

impl MailConfig {
    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key),
            from_email: from_email.into(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            admin_email: None,
            api_base: DEFAULT_SENDGRID_BASE.to_string(),
        }
    }

    pub fn with_admin_email(mut self, admin_email: impl Into<String>) -> Self {
        self.admin_email = Some(admin_email.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HMAC key for session tokens
    pub jwt_secret: Secret,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Session token validity window
    pub token_ttl: Duration,
    /// Postgres URL; `None` selects in-memory stores
    pub database_url: Option<String>,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub cors_origin: String,
    pub media: Option<MediaConfig>,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut builder = AppConfig::builder();
        if let Some(secret) = var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(cost) = var("BCRYPT_SALT_ROUNDS") {
            let cost = cost
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("BCRYPT_SALT_ROUNDS", cost))?;
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(days) = var("TOKEN_TTL_DAYS") {
            let days = days
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("TOKEN_TTL_DAYS", days))?;
            builder = builder.token_ttl_days(days);
        }
        if let Some(url) = var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = var("PORT") {
            let port = port
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("PORT", port))?;
            builder = builder.port(port);
        }
        if let Some(limit) = var("MAX_UPLOAD_BYTES") {
            let limit = limit
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("MAX_UPLOAD_BYTES", limit))?;
            builder = builder.max_upload_bytes(limit);
        }
        if let Some(origin) = var("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }

        if let (Some(cloud), Some(key), Some(secret)) = (
            var("CLOUDINARY_CLOUD_NAME"),
            var("CLOUDINARY_API_KEY"),
            var("CLOUDINARY_API_SECRET"),
        ) {
            let mut media = MediaConfig::new(cloud, key, secret);
            if let Some(base) = var("CLOUDINARY_API_BASE") {
                media = media.with_api_base(base);
            }
            builder = builder.media(media);
        }

        if let (Some(key), Some(sender)) = (var("SENDGRID_API_KEY"), var("EMAIL_USER")) {
            let mut mail = MailConfig::new(key, sender);
            if let Some(name) = var("EMAIL_FROM_NAME") {
                mail.from_name = name;
            }
            if let Some(admin) = var("ADMIN_EMAIL") {
                mail = mail.with_admin_email(admin);
            }
            if let Some(base) = var("SENDGRID_API_BASE") {
                mail = mail.with_api_base(base);
            }
            builder = builder.mail(mail);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.expose().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidCost(self.bcrypt_cost));
        }
        if self.token_ttl <= Duration::zero()
            || self.token_ttl > Duration::days(MAX_TOKEN_TTL_DAYS)
        {
            return Err(ConfigError::InvalidNumber(
                "TOKEN_TTL_DAYS",
                self.token_ttl.num_days().to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    bcrypt_cost: u32,
    token_ttl_days: i64,
    database_url: Option<String>,
    port: u16,
    max_upload_bytes: usize,
    cors_origin: String,
    media: Option<MediaConfig>,
    mail: Option<MailConfig>,
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            database_url: None,
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_origin: "*".to_string(),
            media: None,
            mail: None,
        }
    }
}

impl AppConfigBuilder {
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_days = days;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    pub fn media(mut self, media: MediaConfig) -> Self {
        self.media = Some(media);
        self
    }

    pub fn mail(mut self, mail: MailConfig) -> Self {
        self.mail = Some(mail);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days) {
            return Err(ConfigError::InvalidNumber(
                "TOKEN_TTL_DAYS",
                self.token_ttl_days.to_string(),
            ));
        }
        let config = AppConfig {
            jwt_secret: Secret::new(jwt_secret),
            bcrypt_cost: self.bcrypt_cost,
            token_ttl: Duration::days(self.token_ttl_days),
            database_url: self.database_url,
            port: self.port,
            max_upload_bytes: self.max_upload_bytes,
            cors_origin: self.cors_origin,
            media: self.media,
            mail: self.mail,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid number for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    InvalidCost(u32),
}
