use std::sync::Arc;

use anyhow::Context;
use boldo_config::{EmailConfig, EmailProvider};
use boldo_email_impl::{
    resend::{ResendEmailService, ResendEmailServiceConfig},
    smtp::SmtpEmailService,
    EmailServiceImpl,
};

/// Set up the email backend selected by `email.provider`.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let from = config.from.clone();
    match config.provider {
        EmailProvider::Resend => {
            let resend = config
                .resend
                .as_ref()
                .context("Missing [email.resend] section")?;
            anyhow::ensure!(
                !resend.api_key.is_empty(),
                "No resend api key configured (set email.resend.api_key or {})",
                boldo_config::RESEND_API_KEY_ENV
            );
            let config = ResendEmailServiceConfig {
                api_url: resend.api_url.clone().into(),
                api_key: Arc::new(resend.api_key.clone()),
            };
            ResendEmailService::new(config, from)
                .map(EmailServiceImpl::Resend)
                .context("Failed to set up resend client")
        }
        EmailProvider::Smtp => {
            let smtp = config
                .smtp
                .as_ref()
                .context("Missing [email.smtp] section")?;
            SmtpEmailService::new(&smtp.url, from)
                .map(EmailServiceImpl::Smtp)
                .context("Failed to connect to SMTP server")
        }
    }
}
