/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/api/auth` endpoints. Request fields
 * are optional at the serde level so a missing field becomes a validation
 * error naming it, not a generic body rejection.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::service::{AdminCount, Session};
use crate::backend::auth::users::IdentityView;
use crate::shared::error::SharedError;
use crate::shared::validation::{self, min_length, required, required_verbatim, Validate};

/// Sign up request
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SignupRequest {
    /// At least 3 characters, unique
    pub username: Option<String>,
    /// Valid address, unique
    pub email: Option<String>,
    /// At least 6 characters; hashed before storage
    pub password: Option<String>,
    /// Request an admin account (capped at two)
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let username = required("username", self.username.as_deref())?;
        min_length("username", username, 3)?;
        let email = required("email", self.email.as_deref())?;
        validation::email("email", email)?;
        let password = required_verbatim("password", self.password.as_deref())?;
        min_length("password", password, 6)
    }
}

/// Login request
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), SharedError> {
        let email = required("email", self.email.as_deref())?;
        validation::email("email", email)?;
        let password = required_verbatim("password", self.password.as_deref())?;
        min_length("password", password, 6)
    }
}

/// Auth response
///
/// Returned by signup and login: a status message, the token and the
/// identity's public view.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub message: &'static str,
    /// Bearer token (30-day expiration by default)
    pub token: String,
    pub user: IdentityView,
}

impl AuthResponse {
    pub fn new(message: &'static str, session: Session) -> Self {
        Self {
            message,
            token: session.token,
            user: session.user,
        }
    }
}

/// `GET /api/auth/admin-count` body
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminCountResponse {
    pub admin_count: i64,
    pub max_admins: i64,
    pub remaining_slots: i64,
}

impl From<AdminCount> for AdminCountResponse {
    fn from(count: AdminCount) -> Self {
        Self {
            admin_count: count.admin_count,
            max_admins: count.max_admins,
            remaining_slots: count.remaining_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_reads_is_admin() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"username":"ana","email":"a@x.com","password":"secret1","isAdmin":true}"#,
        )
        .unwrap();
        assert!(request.is_admin);
        request.validate().unwrap();

        let request: SignupRequest = serde_json::from_str(r#"{"username":"ana"}"#).unwrap();
        assert!(!request.is_admin);
        assert_eq!(request.validate().unwrap_err().to_string(), "\"email\" is required");
    }

    #[test]
    fn test_login_password_length() {
        let request = LoginRequest {
            email: Some("a@x.com".into()),
            password: Some("12345".into()),
        };
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "\"password\" length must be at least 6 characters long"
        );
    }

    #[test]
    fn test_whitespace_password_counts_toward_length() {
        let request = LoginRequest {
            email: Some("a@x.com".into()),
            password: Some("      ".into()),
        };
        request.validate().unwrap();

        let request = LoginRequest {
            email: Some("a@x.com".into()),
            password: Some(String::new()),
        };
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "\"password\" is not allowed to be empty"
        );
    }

    #[test]
    fn test_admin_count_wire_names() {
        let body = serde_json::to_value(AdminCountResponse {
            admin_count: 1,
            max_admins: 2,
            remaining_slots: 1,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"adminCount": 1, "maxAdmins": 2, "remainingSlots": 1}));
    }
}
