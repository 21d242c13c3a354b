//! SendGrid v3 mail send client

use async_trait::async_trait;
use serde::Serialize;

use super::{MailError, MailMessage, MailRelay};
use crate::shared::config::MailConfig;

pub struct SendGridClient {
    config: MailConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize, PartialEq)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Address<'a>>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

/// SendGrid rejects requests with more personalizations than this
pub const MAX_PERSONALIZATIONS: usize = 1000;

fn address(email: &str) -> Address<'_> {
    Address { email, name: None }
}

impl SendGridClient {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn build<'a>(
        &'a self,
        message: &'a MailMessage,
        personalizations: Vec<Personalization<'a>>,
    ) -> SendRequest<'a> {
        SendRequest {
            personalizations,
            from: Address {
                email: &self.config.from_email,
                name: Some(&self.config.from_name),
            },
            reply_to: message.reply_to.as_deref().map(address),
            subject: &message.subject,
            content: vec![Content {
                kind: "text/html",
                value: &message.html,
            }],
        }
    }

    /// One personalization holding every recipient
    fn build_single<'a>(&'a self, message: &'a MailMessage) -> SendRequest<'a> {
        let to = message.to.iter().map(|to| address(to)).collect();
        self.build(message, vec![Personalization { to }])
    }

    /// One request per batch, one personalization per recipient so nobody
    /// sees the other addresses
    fn build_bulk<'a>(&'a self, message: &'a MailMessage) -> Vec<SendRequest<'a>> {
        message
            .to
            .chunks(MAX_PERSONALIZATIONS)
            .map(|batch| {
                let personalizations = batch
                    .iter()
                    .map(|to| Personalization { to: vec![address(to)] })
                    .collect();
                self.build(message, personalizations)
            })
            .collect()
    }

    async fn post(&self, request: &SendRequest<'_>) -> Result<(), MailError> {
        let url = format!("{}/v3/mail/send", self.config.api_base.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_key.expose())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("SendGrid send failed: {status} {body}");
            return Err(MailError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MailRelay for SendGridClient {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        self.post(&self.build_single(&message)).await?;
        tracing::info!("Sent \"{}\" to {} recipient(s)", message.subject, message.to.len());
        Ok(())
    }

    async fn send_bulk(&self, message: MailMessage) -> Result<(), MailError> {
        let requests = self.build_bulk(&message);
        let batches = requests.len();
        for (index, request) in requests.iter().enumerate() {
            if let Err(e) = self.post(request).await {
                tracing::error!("Bulk send stopped at batch {}/{}", index + 1, batches);
                return Err(e);
            }
        }
        tracing::info!(
            "Bulk-sent \"{}\" to {} recipient(s) in {} batch(es)",
            message.subject,
            message.to.len(),
            batches
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> SendGridClient {
        SendGridClient::new(MailConfig::new("SG.key", "news@foundation.org"))
    }

    #[test]
    fn test_single_send_uses_one_personalization() {
        let client = client();
        let message =
            MailMessage::to_many(vec!["a@x.com".into(), "b@x.com".into()], "Hi", "<p>x</p>")
                .reply_to("r@x.com");
        let body = serde_json::to_value(client.build_single(&message)).unwrap();

        assert_eq!(
            body,
            json!({
                "personalizations": [{"to": [{"email": "a@x.com"}, {"email": "b@x.com"}]}],
                "from": {"email": "news@foundation.org", "name": "Orphanage Foundation"},
                "reply_to": {"email": "r@x.com"},
                "subject": "Hi",
                "content": [{"type": "text/html", "value": "<p>x</p>"}]
            })
        );
    }

    #[test]
    fn test_bulk_send_splits_recipients() {
        let client = client();
        let message = MailMessage::to_many(vec!["a@x.com".into(), "b@x.com".into()], "Hi", "x");
        let requests = client.build_bulk(&message);
        assert_eq!(requests.len(), 1);
        let body = serde_json::to_value(&requests[0]).unwrap();

        assert_eq!(
            body["personalizations"],
            json!([{"to": [{"email": "a@x.com"}]}, {"to": [{"email": "b@x.com"}]}])
        );
        assert!(body.get("reply_to").is_none());
    }

    #[test]
    fn test_bulk_send_batches_large_lists() {
        let client = client();
        let recipients = (0..MAX_PERSONALIZATIONS * 2 + 1)
            .map(|i| format!("r{i}@x.com"))
            .collect();
        let message = MailMessage::to_many(recipients, "News", "x");
        let requests = client.build_bulk(&message);

        let sizes: Vec<usize> = requests.iter().map(|r| r.personalizations.len()).collect();
        assert_eq!(sizes, vec![MAX_PERSONALIZATIONS, MAX_PERSONALIZATIONS, 1]);
        assert_eq!(requests[2].personalizations[0].to[0].email, "r2000@x.com");
    }
}
