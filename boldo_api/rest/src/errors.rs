use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::middlewares::request_id::RequestId;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Ошибка сервера. Попробуйте позже.";

/// Log `err` under the id of the failed request and answer with the generic
/// message only.
pub fn internal_server_error(
    request_id: RequestId,
    err: impl Into<anyhow::Error>,
) -> Response {
    let err = err.into();
    tracing::error!(%request_id, "internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_MESSAGE)
}

pub fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (
        code,
        Json(ApiError {
            error: error.into(),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}
