use std::net::SocketAddr;

use boldo_api_rest::RestServer;
use boldo_client::{
    ContactField, ContactFields, FormController, FormControllerConfig, HttpContactApi, SubmitStatus,
    CONNECTION_FAILED_MESSAGE,
};
use boldo_core_contact_contracts::{ContactSubmitError, MockContactFeatureService};
use boldo_demo::{COMPANY, EMAIL, MESSAGE, NAME, SUBMISSION};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use url::Url;

#[tokio::test]
async fn submit_ok() {
    let service = MockContactFeatureService::new().with_submit(SUBMISSION.clone(), Ok(()));
    let url = spawn(service).await;
    let sut = make_sut(&url);

    let result = sut.submit().await;

    assert_eq!(result, Ok(SubmitStatus::Success));
    assert_eq!(sut.fields(), ContactFields::default());
}

#[tokio::test]
async fn invalid_email() {
    let mut service = MockContactFeatureService::new();
    service.expect_submit().never();
    let url = spawn(service).await;
    let sut = make_sut(&url);
    sut.update_field(ContactField::Email, "max.mustermann");

    let result = sut.submit().await;

    assert_eq!(
        result,
        Ok(SubmitStatus::Error(
            "Пожалуйста введите корректный email адрес".into()
        ))
    );
    assert_eq!(sut.fields().email, "max.mustermann");
}

#[tokio::test]
async fn provider_rejects() {
    let service = MockContactFeatureService::new().with_submit(
        SUBMISSION.clone(),
        Err(ContactSubmitError::Rejected("quota exceeded".into())),
    );
    let url = spawn(service).await;
    let sut = make_sut(&url);

    let result = sut.submit().await;

    assert_eq!(result, Ok(SubmitStatus::Error("quota exceeded".into())));
    assert_eq!(sut.fields().name, NAME);
}

#[tokio::test]
async fn server_unreachable() {
    let sut = make_sut(&"http://127.0.0.1:9/".parse().unwrap());

    let result = sut.submit().await;

    assert_eq!(
        result,
        Ok(SubmitStatus::Error(CONNECTION_FAILED_MESSAGE.into()))
    );
    assert!(!sut.is_submitting());
}

fn make_sut(url: &Url) -> FormController<HttpContactApi> {
    let api = HttpContactApi::new(url).unwrap();
    let sut = FormController::new(api, FormControllerConfig::default());
    sut.update_field(ContactField::Name, NAME);
    sut.update_field(ContactField::Company, COMPANY);
    sut.update_field(ContactField::Email, EMAIL);
    sut.update_field(ContactField::Message, MESSAGE);
    sut
}

async fn spawn(service: MockContactFeatureService) -> Url {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(RestServer::new(service).serve_with_listener(listener));

    format!("http://{addr}/").parse().unwrap()
}
