use boldo_models::{
    contact::{ContactCompany, ContactMessage, ContactName, ContactSubmission},
    email_address::EmailAddress,
};
use serde::{Deserialize, Serialize};

/// Contact form payload as sent by the website. Every field is optional so
/// that missing fields are reported by validation instead of by the JSON
/// extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactSubmission {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiContactSubmissionError {
    /// `name`, `email` or `message` is missing or empty.
    MissingFields,
    /// `email` does not look like `local-part@domain.tld`.
    InvalidEmail,
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = ApiContactSubmissionError;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        let non_empty = |field: Option<String>| field.filter(|x| !x.is_empty());

        let (Some(name), Some(email), Some(message)) = (
            non_empty(value.name),
            non_empty(value.email),
            non_empty(value.message),
        ) else {
            return Err(ApiContactSubmissionError::MissingFields);
        };

        let email =
            EmailAddress::try_new(email).map_err(|_| ApiContactSubmissionError::InvalidEmail)?;

        Ok(Self {
            name: ContactName::try_new(name)
                .map_err(|_| ApiContactSubmissionError::MissingFields)?,
            company: non_empty(value.company).and_then(|x| ContactCompany::try_new(x).ok()),
            email,
            message: ContactMessage::try_new(message)
                .map_err(|_| ApiContactSubmissionError::MissingFields)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactSubmitted {
    pub success: bool,
    pub message: &'static str,
}
