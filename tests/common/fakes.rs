//! Recording fakes for the outbound collaborators

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use foundation_cms::backend::extract::UploadedFile;
use foundation_cms::backend::mail::{MailError, MailMessage, MailRelay};
use foundation_cms::backend::media::{MediaError, MediaHost};
use foundation_cms::shared::content::{MediaAsset, MediaKind};
use tokio::sync::Mutex;

/// Media host that keeps every upload in memory
#[derive(Default)]
pub struct RecordingMediaHost {
    pub uploads: Mutex<Vec<UploadedFile>>,
    pub fail: AtomicBool,
}

impl RecordingMediaHost {
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.lock().await.len()
    }
}

#[async_trait]
impl MediaHost for RecordingMediaHost {
    async fn upload(&self, file: UploadedFile) -> Result<MediaAsset, MediaError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(MediaError::Status {
                status: 500,
                body: "forced failure".into(),
            });
        }

        let mut uploads = self.uploads.lock().await;
        let kind = match file.content_type.as_deref() {
            Some(ct) if ct.starts_with("video/") => MediaKind::Video,
            _ => MediaKind::Image,
        };
        let public_id = format!("test/asset-{}", uploads.len() + 1);
        uploads.push(file);

        Ok(MediaAsset {
            url: format!("https://media.test/{public_id}"),
            kind,
            public_id,
        })
    }

    async fn destroy(&self, _public_id: &str, _kind: MediaKind) -> Result<(), MediaError> {
        Ok(())
    }
}

/// How a message went out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Single,
    Bulk,
}

/// Email relay that records messages instead of sending them
#[derive(Default)]
pub struct RecordingMailRelay {
    pub sent: Mutex<Vec<(Delivery, MailMessage)>>,
    pub fail: AtomicBool,
}

impl RecordingMailRelay {
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<(Delivery, MailMessage)> {
        self.sent.lock().await.clone()
    }

    async fn record(&self, delivery: Delivery, message: MailMessage) -> Result<(), MailError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(MailError::Status {
                status: 401,
                body: "forced failure".into(),
            });
        }
        self.sent.lock().await.push((delivery, message));
        Ok(())
    }
}

#[async_trait]
impl MailRelay for RecordingMailRelay {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        self.record(Delivery::Single, message).await
    }

    async fn send_bulk(&self, message: MailMessage) -> Result<(), MailError> {
        self.record(Delivery::Bulk, message).await
    }
}
