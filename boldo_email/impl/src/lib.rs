use boldo_email_contracts::{Email, EmailSendError, EmailService};

pub mod http;
pub mod resend;
pub mod smtp;

use resend::ResendEmailService;
use smtp::SmtpEmailService;

/// The email backend selected by the configuration.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Resend(ResendEmailService),
    Smtp(SmtpEmailService),
}

impl EmailServiceImpl {
    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        Self::Smtp(
            SmtpEmailService::new("smtp://dummy", "dummy@example.com".parse().unwrap()).unwrap(),
        )
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        match self {
            Self::Resend(resend) => resend.send(email).await,
            Self::Smtp(smtp) => smtp.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Resend(resend) => resend.ping().await,
            Self::Smtp(smtp) => smtp.ping().await,
        }
    }
}
