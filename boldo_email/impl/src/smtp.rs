use anyhow::{anyhow, Context};
use boldo_email_contracts::{ContentType, Email, EmailSendError};
use boldo_models::email_address::EmailAddressWithName;
use boldo_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::warn;

/// Delivers emails to an SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpEmailService {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Invalid smtp url")?
            .build();

        Ok(Self { from, transport })
    }

    pub(crate) async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let reply_to = email
            .reply_to
            .map(|x| x.as_str().parse::<Mailbox>())
            .transpose()
            .context("Invalid reply-to address")?;

        let message = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(reply_to, MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .context("Failed to build email")?;

        match self.transport.send(message).await {
            Ok(response) if response.is_positive() => Ok(()),
            Ok(response) => {
                let code = response.code();
                warn!(%code, "smtp server did not accept the message");
                Err(EmailSendError::Rejected(format!(
                    "SMTP server responded with {code}"
                )))
            }
            Err(err) if err.is_permanent() => {
                warn!("smtp server rejected the message: {err}");
                Err(EmailSendError::Rejected(err.to_string()))
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context("Failed to send email")
                .into()),
        }
    }

    pub(crate) async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
