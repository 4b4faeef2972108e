use std::sync::Arc;

use anyhow::Context;
use boldo_email_contracts::{ContentType, Email, EmailSendError};
use boldo_models::{email_address::EmailAddressWithName, Sensitive};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

/// Delivers emails through the HTTP API of [Resend](https://resend.com/).
#[derive(Debug, Clone)]
pub struct ResendEmailService {
    from: Arc<EmailAddressWithName>,
    config: ResendEmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendEmailServiceConfig {
    pub api_url: Arc<Url>,
    pub api_key: Arc<Sensitive<String>>,
}

impl ResendEmailService {
    pub fn new(
        config: ResendEmailServiceConfig,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            from: from.into(),
            config,
            client: HttpClient::new()?,
        })
    }

    pub(crate) async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let endpoint = self.config.api_url.join("emails").context("Invalid api url")?;

        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: self.from.to_string(),
            to: [email.recipient.to_string()],
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_deref().map(String::as_str),
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(self.config.api_key.as_str())
            .json(&request)
            .send()
            .await
            .context("Failed to reach email provider")?;

        let status = response.status();
        if status.is_success() {
            match response.json::<SendEmailResponse>().await {
                Ok(SendEmailResponse { id }) => debug!(%id, "email accepted by provider"),
                Err(err) => {
                    warn!(%status, "email accepted, but response is not understood: {err}")
                }
            }
            return Ok(());
        }

        match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse { message, name }) => {
                warn!(%status, ?name, %message, "email provider rejected the message");
                Err(EmailSendError::Rejected(message))
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("Email provider responded with {status}"))
                .into()),
        }
    }

    pub(crate) async fn ping(&self) -> anyhow::Result<()> {
        self.client
            .get((*self.config.api_url).clone())
            .send()
            .await
            .map(|_| ())
            .context("Failed to reach email provider")
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [String; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
    name: Option<String>,
}
