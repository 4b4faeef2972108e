use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use boldo_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use boldo_models::contact::ContactSubmission;

use crate::{
    errors::{error, internal_server_error},
    middlewares::request_id::RequestId,
    models::contact::{ApiContactSubmission, ApiContactSubmissionError, ApiContactSubmitted},
};

pub const MISSING_FIELDS_MESSAGE: &str = "Пожалуйста заполните все обязательные поля";
pub const INVALID_EMAIL_MESSAGE: &str = "Пожалуйста введите корректный email адрес";
pub const SUBMITTED_MESSAGE: &str = "Заявка отправлена";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

/// The body is read as JSON regardless of the `Content-Type` header.
async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Response {
    let payload = match serde_json::from_slice::<ApiContactSubmission>(&body)
        .context("Failed to parse contact form body")
    {
        Ok(payload) => payload,
        Err(err) => return internal_server_error(request_id, err),
    };

    let submission = match ContactSubmission::try_from(payload) {
        Ok(submission) => submission,
        Err(ApiContactSubmissionError::MissingFields) => {
            return error(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
        }
        Err(ApiContactSubmissionError::InvalidEmail) => {
            return error(StatusCode::BAD_REQUEST, INVALID_EMAIL_MESSAGE)
        }
    };

    match service.submit(submission).await {
        Ok(()) => Json(ApiContactSubmitted {
            success: true,
            message: SUBMITTED_MESSAGE,
        })
        .into_response(),
        Err(ContactSubmitError::Rejected(message)) => error(StatusCode::BAD_REQUEST, message),
        Err(ContactSubmitError::Other(err)) => internal_server_error(request_id, err),
    }
}
