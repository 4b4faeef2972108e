use std::sync::LazyLock;

use boldo_models::{
    contact::ContactSubmission,
    email_address::{EmailAddress, EmailAddressWithName},
};

pub const NAME: &str = "Max Mustermann";
pub const COMPANY: &str = "ACME QA GmbH";
pub const EMAIL: &str = "max.mustermann@example.de";
pub const MESSAGE: &str = "Hello!\nWe need regression testing for our mobile app.";

pub static OPERATOR_INBOX: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "Boldo <contact@example.com>".parse().unwrap());

pub static SUBMITTER_EMAIL: LazyLock<EmailAddress> =
    LazyLock::new(|| EMAIL.try_into().unwrap());

/// A complete submission, company included.
pub static SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: NAME.try_into().unwrap(),
    company: Some(COMPANY.try_into().unwrap()),
    email: SUBMITTER_EMAIL.clone(),
    message: MESSAGE.try_into().unwrap(),
});

/// A submission that only contains the required fields.
pub static SUBMISSION_WITHOUT_COMPANY: LazyLock<ContactSubmission> =
    LazyLock::new(|| ContactSubmission {
        company: None,
        ..SUBMISSION.clone()
    });
