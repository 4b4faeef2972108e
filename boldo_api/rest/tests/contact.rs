use std::{future::ready, net::SocketAddr};

use anyhow::anyhow;
use boldo_api_rest::RestServer;
use boldo_core_contact_contracts::{ContactSubmitError, MockContactFeatureService};
use boldo_demo::{COMPANY, EMAIL, MESSAGE, NAME, SUBMISSION, SUBMISSION_WITHOUT_COMPANY};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const MISSING_FIELDS: &str = "Пожалуйста заполните все обязательные поля";
const INVALID_EMAIL: &str = "Пожалуйста введите корректный email адрес";
const SERVER_ERROR: &str = "Ошибка сервера. Попробуйте позже.";

#[tokio::test]
async fn submit_ok() {
    let service = MockContactFeatureService::new().with_submit(SUBMISSION.clone(), Ok(()));
    let url = spawn(service).await;

    let (status, body) = post(
        &url,
        json!({
            "name": NAME,
            "company": COMPANY,
            "email": format!("  {EMAIL} "),
            "message": MESSAGE,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Заявка отправлена" }));
}

#[tokio::test]
async fn submit_without_company() {
    let service =
        MockContactFeatureService::new().with_submit(SUBMISSION_WITHOUT_COMPANY.clone(), Ok(()));
    let url = spawn(service).await;

    let (status, _) = post(
        &url,
        json!({ "name": NAME, "email": EMAIL, "message": MESSAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_company_is_unspecified() {
    let service =
        MockContactFeatureService::new().with_submit(SUBMISSION_WITHOUT_COMPANY.clone(), Ok(()));
    let url = spawn(service).await;

    let (status, _) = post(
        &url,
        json!({ "name": NAME, "company": "", "email": EMAIL, "message": MESSAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_fields() {
    let mut service = MockContactFeatureService::new();
    service.expect_submit().never();
    let url = spawn(service).await;

    let complete = json!({ "name": NAME, "email": EMAIL, "message": MESSAGE });
    for field in ["name", "email", "message"] {
        let mut absent = complete.clone();
        absent.as_object_mut().unwrap().remove(field);

        let mut empty = complete.clone();
        empty[field] = json!("");

        let mut null = complete.clone();
        null[field] = Value::Null;

        for payload in [absent, empty, null] {
            let (status, body) = post(&url, payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": MISSING_FIELDS }));
        }
    }
}

#[tokio::test]
async fn invalid_email() {
    let mut service = MockContactFeatureService::new();
    service.expect_submit().never();
    let url = spawn(service).await;

    for email in ["abc", "a@b", "a b@c.com", "@example.com", "max@", "   "] {
        let (status, body) = post(
            &url,
            json!({ "name": NAME, "email": email, "message": MESSAGE }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email:?}");
        assert_eq!(body, json!({ "error": INVALID_EMAIL }));
    }
}

#[tokio::test]
async fn valid_email_shapes() {
    let mut service = MockContactFeatureService::new();
    service
        .expect_submit()
        .times(2)
        .returning(|_| Box::pin(ready(Ok::<_, ContactSubmitError>(()))));
    let url = spawn(service).await;

    for email in ["a@b.co", "x.y+z@sub.domain.com"] {
        let (status, _) = post(
            &url,
            json!({ "name": NAME, "email": email, "message": MESSAGE }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{email:?}");
    }
}

#[tokio::test]
async fn provider_rejects() {
    let service = MockContactFeatureService::new().with_submit(
        SUBMISSION.clone(),
        Err(ContactSubmitError::Rejected("quota exceeded".into())),
    );
    let url = spawn(service).await;

    let (status, body) = post(
        &url,
        json!({ "name": NAME, "company": COMPANY, "email": EMAIL, "message": MESSAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "quota exceeded" }));
}

#[tokio::test]
async fn provider_fails() {
    let service = MockContactFeatureService::new().with_submit(
        SUBMISSION.clone(),
        Err(ContactSubmitError::Other(anyhow!(
            "tls handshake with smtp.internal.example failed"
        ))),
    );
    let url = spawn(service).await;

    let (status, body) = post(
        &url,
        json!({ "name": NAME, "company": COMPANY, "email": EMAIL, "message": MESSAGE }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": SERVER_ERROR }));
    assert!(!body.to_string().contains("smtp.internal.example"));
}

#[tokio::test]
async fn malformed_body() {
    let mut service = MockContactFeatureService::new();
    service.expect_submit().never();
    let url = spawn(service).await;

    let response = reqwest::Client::new()
        .post(url.clone())
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!({ "error": SERVER_ERROR }));
}

#[tokio::test]
async fn body_without_content_type() {
    let service = MockContactFeatureService::new().with_submit(SUBMISSION.clone(), Ok(()));
    let url = spawn(service).await;

    let payload = json!({ "name": NAME, "company": COMPANY, "email": EMAIL, "message": MESSAGE });
    let response = reqwest::Client::new()
        .post(url)
        .body(payload.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!({ "success": true, "message": "Заявка отправлена" }));
}

#[tokio::test]
async fn body_with_text_content_type() {
    let mut service = MockContactFeatureService::new();
    service.expect_submit().never();
    let url = spawn(service).await;

    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "text/plain;charset=UTF-8")
        .body(json!({ "name": NAME, "message": MESSAGE }).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!({ "error": MISSING_FIELDS }));
}

#[tokio::test]
async fn request_id_header() {
    let mut service = MockContactFeatureService::new();
    service.expect_submit().never();
    let url = spawn(service).await;

    let response = reqwest::Client::new()
        .post(url)
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    let request_id = response.headers().get("X-Request-Id").unwrap();
    assert!(!request_id.is_empty());
}

async fn spawn(service: MockContactFeatureService) -> reqwest::Url {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(RestServer::new(service).serve_with_listener(listener));

    format!("http://{addr}/api/contact").parse().unwrap()
}

async fn post(url: &reqwest::Url, payload: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(url.clone())
        .json(&payload)
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body = response.json().await.unwrap();
    (status, body)
}
