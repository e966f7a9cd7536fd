use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::Response,
    Json,
};
use microcuenca_models::contact::ValidationError;
use serde_json::Value;
use tracing::warn;

use crate::errors::{payload_too_large, validation_error};

/// Untyped JSON request body, validated by the handler.
pub struct JsonPayload(pub Value);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JsonPayload {
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<Value>::from_request(request, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(reject)
    }
}

fn reject(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => payload_too_large(),
        _ => validation_error(ValidationError::body(
            "El cuerpo de la solicitud no es un JSON válido.",
        )),
    }
}
