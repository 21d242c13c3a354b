/**
 * Session Tokens
 *
 * Stateless HS256 bearer tokens asserting an identity id. Tokens are never
 * stored; a token stays valid until its signature or expiry check fails.
 *
 * # Claims
 *
 * ```json
 * { "sub": "<identity uuid>", "iat": 1700000000, "exp": 1702592000 }
 * ```
 *
 * `exp` and `sub` are required and expiry is checked with zero leeway.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::config::Secret;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature does not match the server secret
    #[error("token signature is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    /// Not a parseable token, or claims missing / of the wrong shape
    #[error("token is malformed")]
    Malformed,

    /// Signing failed while issuing
    #[error("token could not be signed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    /// Issue time plus lifetime is not a representable instant
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

/// Signs and verifies session tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &Secret, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.expose().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose().as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a token for `identity_id`, valid for the configured TTL
    pub fn issue(&self, identity_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(identity_id, Utc::now())
    }

    /// Issue a token as if it were `issued_at`
    pub fn issue_at(
        &self,
        identity_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: identity_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encoding)
    }

    /// Check signature and expiry, returning the identity id
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::Invalid,
                _ => TokenError::Malformed,
            }
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}
