use std::future::Future;

use boldo_models::email_address::{EmailAddress, EmailAddressWithName};
use thiserror::Error;

/// Capability of delivering a single email through an external provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send the email. Exactly one delivery attempt is made.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailSendError>> + Send;

    /// Check that the provider is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    /// The provider processed the request and refused to deliver the email.
    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), String>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| {
                Box::pin(std::future::ready(result.map_err(EmailSendError::Rejected)))
            });
        self
    }
}
