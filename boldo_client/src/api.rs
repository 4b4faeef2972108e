use std::future::Future;

use anyhow::Context;
use boldo_utils::boldo_version;
use serde::Deserialize;
use url::Url;

use crate::ContactFields;

pub const CONTACT_ROUTE: &str = "api/contact";

/// Transport delivering the form fields to the submission endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Post the fields. Fails only if no response could be obtained.
    fn send(
        &self,
        fields: &ContactFields,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiResponse {
    /// Whether the endpoint answered with a 2xx status code.
    pub is_success: bool,
    pub body: ContactResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactResponseBody {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContactApi {
    /// `base_url` is the root of the website, e.g. `https://boldo.example/`.
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let endpoint = base_url
            .join(CONTACT_ROUTE)
            .context("Invalid website url")?;
        let client = reqwest::Client::builder()
            .user_agent(format!("Boldo Contact Form/{}", boldo_version()))
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client, endpoint })
    }
}

impl ContactApi for HttpContactApi {
    async fn send(&self, fields: &ContactFields) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(fields)
            .send()
            .await
            .context("Failed to send contact form")?;

        let is_success = response.status().is_success();
        let body = response
            .json()
            .await
            .context("Failed to parse contact form response")?;

        Ok(ContactApiResponse { is_success, body })
    }
}
