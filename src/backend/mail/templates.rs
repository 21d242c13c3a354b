//! Email templates
//!
//! Every value that came from a request is passed through [`escape_html`]
//! before it is interpolated.

use crate::shared::content::{ContactSubmission, MediaAsset, NewsletterIssue};

use super::MailMessage;

pub const WELCOME_SUBJECT: &str = "Welcome to Our Newsletter!";

/// Escape text for safe inclusion in HTML element content and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn welcome(to: &str) -> MailMessage {
    let html = "<h2>Welcome to Our Family 💙</h2>\
        <p>Thank you for subscribing to our newsletter! You'll receive updates on our latest \
        projects, events, and activities.</p>\
        <p>– The Orphanage Team</p>";
    MailMessage::new(to, WELCOME_SUBJECT, html)
}

pub fn newsletter(
    issue: &NewsletterIssue,
    attachment: Option<&MediaAsset>,
    to: Vec<String>,
) -> MailMessage {
    let mut html = format!(
        "<h2>{}</h2><p>{}</p>",
        escape_html(&issue.title),
        escape_html(&issue.content)
    );
    if let Some(asset) = attachment {
        html.push_str(&format!(
            "<p><a href=\"{}\">View Attachment</a></p>",
            escape_html(&asset.url)
        ));
    }
    MailMessage::to_many(to, issue.title.clone(), html)
}

pub fn contact_notification(submission: &ContactSubmission, admin_email: &str) -> MailMessage {
    let html = format!(
        "<h2>New Contact Submission</h2>\
         <p><strong>Name:</strong> {} {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <p><strong>Message:</strong></p>\
         <p>{}</p>",
        escape_html(&submission.first_name),
        escape_html(&submission.last_name),
        escape_html(&submission.email),
        escape_html(&submission.subject),
        escape_html(&submission.message),
    );
    MailMessage::new(admin_email, format!("New Contact: {}", submission.subject), html)
        .reply_to(submission.email.clone())
}
