//! Cloudinary upload API client
//!
//! Requests are signed: the sorted `key=value` parameters (excluding `file`
//! and `api_key`) are joined with `&`, the API secret is appended and the
//! result is hashed with SHA-256. Every other posted field must be in the
//! signed string.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{MediaError, MediaHost};
use crate::backend::extract::UploadedFile;
use crate::shared::config::MediaConfig;
use crate::shared::content::{MediaAsset, MediaKind};

pub struct CloudinaryClient {
    config: MediaConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    resource_type: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Hex SHA-256 signature over already-sorted parameters
pub fn sign(params: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(params.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, resource: &str, action: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name,
            resource,
            action
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, MediaError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Cloudinary request failed: {status} {body}");
        Err(MediaError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, file: UploadedFile) -> Result<MediaAsset, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &format!("timestamp={timestamp}"),
            self.config.api_secret.expose(),
        );

        let mut part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("auto", "upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = Self::check(response).await?.json().await?;

        tracing::info!("Uploaded media {} ({})", uploaded.public_id, uploaded.resource_type);
        Ok(MediaAsset {
            url: uploaded.secure_url,
            kind: MediaKind::from_resource_type(&uploaded.resource_type),
            public_id: uploaded.public_id,
        })
    }

    async fn destroy(&self, public_id: &str, kind: MediaKind) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &format!("public_id={public_id}&timestamp={timestamp}"),
            self.config.api_secret.expose(),
        );

        let form = Form::new()
            .text("public_id", public_id.to_string())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint(kind.as_str(), "destroy"))
            .multipart(form)
            .send()
            .await?;
        let destroyed: DestroyResponse = Self::check(response).await?.json().await?;

        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(MediaError::InvalidResponse(format!("destroy result: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_matches_known_digest() {
        assert_eq!(
            sign("timestamp=1315060510", "abcd"),
            "5652e549a70bdc03f73a633a23b7d3f3b067d72fff26dd15b25997f46fdf6439"
        );
        assert_eq!(
            sign("public_id=sample&timestamp=1315060510", "abcd"),
            "0d4fe14b2b4a3f68a97ccc5097c43908b623d24293c296826a9390c14d891509"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = CloudinaryClient::new(
            MediaConfig::new("demo", "key", "secret").with_api_base("http://localhost:9000/"),
        );
        assert_eq!(
            client.endpoint("auto", "upload"),
            "http://localhost:9000/v1_1/demo/auto/upload"
        );
    }
}
