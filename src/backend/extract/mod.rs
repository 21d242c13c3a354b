//! Request Extractors
//!
//! - **`json`** - `ApiJson<T>`, a JSON body whose rejections are `BackendError`s
//! - **`form`** - `ContentForm`, text fields plus an optional file, read from
//!   either a multipart or a JSON body

pub mod form;
pub mod json;

pub use form::{ContentForm, UploadedFile};
pub use json::ApiJson;
