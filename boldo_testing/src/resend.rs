//! Minimal stand-in for the Resend email API.
//!
//! Accepted emails are kept in memory and can be listed via `GET /emails`.
//! Recipients with the local part `reject` are refused with a validation
//! error, which makes the provider error path reproducible.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use url::Url;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub id: Uuid,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug)]
struct FakeResend {
    api_key: String,
    emails: Mutex<Vec<ReceivedEmail>>,
}

/// Handle to a fake Resend server running in the background.
#[derive(Debug, Clone)]
pub struct FakeResendHandle {
    pub url: Url,
    state: Arc<FakeResend>,
}

impl FakeResendHandle {
    /// All emails accepted so far, oldest first.
    pub async fn emails(&self) -> Vec<ReceivedEmail> {
        self.state.emails.lock().await.clone()
    }
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting fake resend server on {host}:{port}");
    info!("Resend api url: http://{host}:{port}/");
    info!("Api key: {api_key:?}");
    info!("Emails to recipients named \"reject@...\" are refused");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(new_state(api_key)))
        .await
        .context("Failed to start HTTP server")
}

/// Start a fake Resend server on an ephemeral local port.
pub async fn spawn(api_key: impl Into<String>) -> anyhow::Result<FakeResendHandle> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .context("Failed to bind to ephemeral port")?;
    let addr = listener.local_addr()?;
    let state = new_state(api_key.into());

    let router = router(Arc::clone(&state));
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok(FakeResendHandle {
        url: format!("http://{addr}/").parse()?,
        state,
    })
}

fn new_state(api_key: String) -> Arc<FakeResend> {
    Arc::new(FakeResend {
        api_key,
        emails: Default::default(),
    })
}

fn router(state: Arc<FakeResend>) -> Router<()> {
    Router::new()
        .route("/", routing::get(|| async { "fake resend" }))
        .route(EMAILS_ROUTE, routing::post(send_email).get(list_emails))
        .with_state(state)
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

async fn send_email(
    state: State<Arc<FakeResend>>,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let expected = format!("Bearer {}", state.api_key);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected.as_bytes());
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "validation_error", "API key is invalid");
    }

    if request.html.is_none() && request.text.is_none() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `html` or `text` field.",
        );
    }

    if let Some(rejected) = request.to.iter().find(|to| is_rejected(to)) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            &format!("Invalid `to` field: {rejected} does not accept emails."),
        );
    }

    let email = ReceivedEmail {
        id: Uuid::new_v4(),
        from: request.from,
        to: request.to,
        subject: request.subject,
        html: request.html,
        text: request.text,
        reply_to: request.reply_to,
    };
    let id = email.id;
    info!(%id, to = ?email.to, subject = %email.subject, "received email");
    state.emails.lock().await.push(email);

    Json(json!({ "id": id })).into_response()
}

async fn list_emails(state: State<Arc<FakeResend>>) -> Json<Vec<ReceivedEmail>> {
    Json(state.emails.lock().await.clone())
}

fn is_rejected(recipient: &str) -> bool {
    let address = recipient
        .rsplit_once('<')
        .map_or(recipient, |(_, addr)| addr.trim_end_matches('>'));
    address.split('@').next() == Some("reject")
}

fn error(status: StatusCode, name: &str, message: &str) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "name": name,
        "message": message,
    });
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_recipients() {
        assert!(is_rejected("reject@example.com"));
        assert!(is_rejected("Someone <reject@example.com>"));
        assert!(!is_rejected("contact@example.com"));
        assert!(!is_rejected("Reject Me <contact@example.com>"));
    }

    #[tokio::test]
    async fn accepts_and_lists_emails() {
        let server = spawn("re_test").await.unwrap();
        let client = reqwest::Client::new();

        let response = client
            .post(server.url.join("emails").unwrap())
            .bearer_auth("re_test")
            .json(&json!({
                "from": "Boldo <onboarding@resend.dev>",
                "to": ["contact@example.com"],
                "subject": "Hello",
                "text": "Hello World!",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listed = client
            .get(server.url.join("emails").unwrap())
            .send()
            .await
            .unwrap()
            .json::<Vec<ReceivedEmail>>()
            .await
            .unwrap();
        assert_eq!(listed, server.emails().await);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].subject, "Hello");
    }

    #[tokio::test]
    async fn wrong_api_key() {
        let server = spawn("re_test").await.unwrap();

        let response = reqwest::Client::new()
            .post(server.url.join("emails").unwrap())
            .bearer_auth("re_wrong")
            .json(&json!({
                "from": "Boldo <onboarding@resend.dev>",
                "to": ["contact@example.com"],
                "subject": "Hello",
                "text": "Hello World!",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(server.emails().await.is_empty());
    }
}
