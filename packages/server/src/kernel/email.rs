//! Transactional email: templates, the delivery error, and the HTTP client
//! for the mail API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use super::BaseEmailService;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub template: &'static str,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery failed. Callers decide whether this is fatal.
#[derive(Debug, Error)]
pub enum EmailSendingError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Could not reach the mail API: {0}")]
    Transport(String),

    #[error("Mail API rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// A plain-text email template together with its render context.
///
/// Templates are held across the send await, so they must be `Sync` for the
/// calling handler's future to stay `Send`.
pub trait EmailTemplate: Send + Sync {
    /// Stable template name, used for logging and the mail API
    fn name(&self) -> &'static str;
    fn subject(&self) -> String;
    fn body(&self) -> String;
}

/// Render `template` and hand it to the email service.
pub async fn send_templated_email(
    email: &dyn BaseEmailService,
    template: &dyn EmailTemplate,
    to_address: &str,
) -> Result<(), EmailSendingError> {
    let to = to_address.trim();
    if to.is_empty() || !to.contains('@') {
        return Err(EmailSendingError::InvalidRecipient(to_address.to_string()));
    }

    let message = EmailMessage {
        template: template.name(),
        to: to.to_string(),
        subject: template.subject(),
        body: template.body(),
    };

    debug!(template = message.template, to = %message.to, "Sending templated email");
    email.send_email(&message).await
}

// =============================================================================
// HTTP mail API client
// =============================================================================

#[derive(Debug, Serialize)]
struct MailApiRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    tags: [&'a str; 1],
}

/// Sends mail through an HTTP mail API (JSON body, bearer auth)
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpEmailService {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        from: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl BaseEmailService for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), EmailSendingError> {
        let payload = MailApiRequest {
            from: &self.from,
            to: [&message.to],
            subject: &message.subject,
            text: &message.body,
            tags: [message.template],
        };

        let mut request = self.client.post(&self.api_url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmailSendingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, template = message.template, "Mail API rejected message");
            return Err(EmailSendingError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(template = message.template, "Email accepted by mail API");
        Ok(())
    }
}
