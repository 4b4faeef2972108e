//! Wiring of the production services.

use boldo_config::Config;
use boldo_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use boldo_email_impl::EmailServiceImpl;
use boldo_templates_impl::TemplateServiceImpl;

pub type ContactFeature = ContactFeatureServiceImpl<EmailServiceImpl, TemplateServiceImpl>;
pub type RestServer = boldo_api_rest::RestServer<ContactFeature>;

pub fn contact_feature(config: &Config, email: EmailServiceImpl) -> anyhow::Result<ContactFeature> {
    let template = TemplateServiceImpl::new()?;
    let config = ContactFeatureConfig {
        recipient: config.contact.recipient.clone().into(),
        provider_timeout: *config.contact.provider_timeout,
    };

    Ok(ContactFeatureServiceImpl::new(email, template, config))
}

pub fn rest_server(config: &Config, email: EmailServiceImpl) -> anyhow::Result<RestServer> {
    contact_feature(config, email).map(RestServer::new)
}
