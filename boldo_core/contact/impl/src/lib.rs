use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use boldo_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use boldo_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use boldo_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use boldo_templates_contracts::{ContactNotificationTemplate, TemplateService};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Inbox receiving the notifications.
    pub recipient: Arc<EmailAddressWithName>,
    /// Upper bound for the single delivery attempt.
    pub provider_timeout: Duration,
}

impl<Email, Template> ContactFeatureServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template, config: ContactFeatureConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, Template> ContactFeatureService for ContactFeatureServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactSubmitError> {
        let ContactSubmission {
            name,
            company,
            email,
            message,
        } = submission;

        let subject = format!("Новая заявка от {}", *name);
        let body = self.template.render(&ContactNotificationTemplate {
            name: name.into_inner(),
            company: company.map(|company| company.into_inner()),
            email: email.to_string(),
            message: message.into_inner(),
        })?;

        let notification = Email {
            recipient: (*self.config.recipient).clone(),
            subject,
            body,
            content_type: ContentType::Html,
            reply_to: Some(email),
        };

        let result = tokio::time::timeout(
            self.config.provider_timeout,
            self.email.send(notification),
        )
        .await
        .map_err(|_| {
            anyhow!(
                "Email provider did not respond within {:?}",
                self.config.provider_timeout
            )
        })?;

        match result {
            Ok(()) => {
                debug!("contact notification sent");
                Ok(())
            }
            Err(EmailSendError::Rejected(message)) => {
                warn!(%message, "email provider rejected contact notification");
                Err(ContactSubmitError::Rejected(message))
            }
            Err(EmailSendError::Other(err)) => Err(err
                .context("Failed to send contact notification")
                .into()),
        }
    }
}
