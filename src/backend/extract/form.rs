//! Content form extractor
//!
//! Content and newsletter endpoints accept either:
//!
//! - `multipart/form-data` with text fields and an optional `file` part
//! - a JSON object whose values become text fields
//!
//! Either way handlers receive a [`ContentForm`]. An empty `file` part is
//! treated as no file.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use bytes::Bytes;
use serde_json::{Map, Value};

use crate::backend::error::BackendError;
use crate::backend::extract::json::ApiJson;
use crate::shared::content::FormFields;

/// Name of the multipart part carrying the media file
pub const FILE_FIELD: &str = "file";

/// A file received in a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Text fields plus an optional file
#[derive(Debug, Clone, Default)]
pub struct ContentForm {
    pub fields: FormFields,
    pub file: Option<UploadedFile>,
}

impl ContentForm {
    /// Flatten a JSON object into text fields. `null` values are dropped;
    /// numbers and booleans keep their JSON spelling.
    pub fn from_json(object: Map<String, Value>) -> Self {
        let fields = object
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();

        Self { fields, file: None }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILE_FIELD {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            } else if !name.is_empty() {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}

impl<S> FromRequest<S> for ContentForm
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await?;
            Self::from_multipart(multipart).await
        } else {
            let ApiJson(object) = ApiJson::<Map<String, Value>>::from_request(req, state).await?;
            Ok(Self::from_json(object))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[test]
    fn test_from_json_flattens_values() {
        let object = serde_json::json!({
            "title": "Gala",
            "seats": 40,
            "featured": true,
            "location": null
        });
        let Value::Object(object) = object else { unreachable!() };
        let form = ContentForm::from_json(object);

        assert_eq!(form.fields["title"], "Gala");
        assert_eq!(form.fields["seats"], "40");
        assert_eq!(form.fields["featured"], "true");
        assert!(!form.fields.contains_key("location"));
        assert!(form.file.is_none());
    }

    #[tokio::test]
    async fn test_extracts_json_body() {
        let form = ContentForm::from_request(json_request(r#"{"title":"Hi"}"#), &())
            .await
            .unwrap();
        assert_eq!(form.fields["title"], "Hi");
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let err = ContentForm::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extracts_multipart_fields_and_file() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHello\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\n\
             Content-Type: image/png\r\n\r\nPNGDATA\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();

        let form = ContentForm::from_request(request, &()).await.unwrap();
        assert_eq!(form.fields["title"], "Hello");
        let file = form.file.unwrap();
        assert_eq!(file.file_name.as_deref(), Some("a.png"));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(&file.bytes[..], b"PNGDATA");
    }
}
