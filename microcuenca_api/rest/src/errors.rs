use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use microcuenca_models::contact::{FieldError, ValidationError};
use serde::Serialize;

use crate::{middlewares::error_details::ErrorDetails, models::ApiTimestamp};

pub const INTERNAL_SERVER_ERROR: &str = "Error interno del servidor";
pub const PAYLOAD_TOO_LARGE: &str = "El cuerpo de la solicitud es demasiado grande.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    ContactProcessingError,
    RateLimitExceeded,
    PayloadTooLarge,
    InternalError,
    NotFound,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError<'a> {
    pub success: bool,
    pub error: &'a str,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<&'a [&'a str]>,
    pub timestamp: ApiTimestamp,
}

impl<'a> ApiError<'a> {
    pub fn new(code: ErrorCode, error: &'a str) -> Self {
        Self {
            success: false,
            error,
            code,
            details: None,
            retry_after: None,
            available_endpoints: None,
            timestamp: ApiTimestamp::now(),
        }
    }
}

pub fn error(status: StatusCode, error: ApiError<'_>) -> Response {
    (status, Json(error)).into_response()
}

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    internal_error(err, ErrorCode::InternalError, INTERNAL_SERVER_ERROR)
}

/// Logs `err` and responds with a generic `500` that does not reveal it.
pub fn internal_error(err: impl Into<anyhow::Error>, code: ErrorCode, message: &str) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    let mut response = error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiError::new(code, message),
    );
    response
        .extensions_mut()
        .insert(ErrorDetails(err.to_string()));
    response
}

pub fn validation_error(err: ValidationError) -> Response {
    let message = err.to_string();
    error(
        StatusCode::BAD_REQUEST,
        ApiError {
            details: Some(err.errors),
            ..ApiError::new(ErrorCode::ValidationError, &message)
        },
    )
}

pub fn rate_limited(message: &str, retry_after: u64) -> Response {
    error(
        StatusCode::TOO_MANY_REQUESTS,
        ApiError {
            retry_after: Some(retry_after),
            ..ApiError::new(ErrorCode::RateLimitExceeded, message)
        },
    )
}

pub fn payload_too_large() -> Response {
    error(
        StatusCode::PAYLOAD_TOO_LARGE,
        ApiError::new(ErrorCode::PayloadTooLarge, PAYLOAD_TOO_LARGE),
    )
}
