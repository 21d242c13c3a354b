//! Authentication test helpers

use axum::http::HeaderValue;
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

/// POST /api/auth/signup
pub async fn signup(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> TestResponse {
    server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
            "isAdmin": is_admin,
        }))
        .await
}

/// POST /api/auth/login
pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

/// Sign up an admin and return its bearer token
pub async fn admin_token(server: &TestServer) -> String {
    let body: Value = signup(server, "editor", "editor@foundation.org", "secret1", true)
        .await
        .json();
    body["token"]
        .as_str()
        .expect("signup returns a token")
        .to_string()
}

/// `Bearer <token>` as an `Authorization` value
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("token is a valid header value")
}
