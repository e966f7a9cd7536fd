use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use microcuenca_core_health_contracts::HealthFeatureService;
use serde::Serialize;
use tracing::error;

use crate::{middlewares::error_details::ErrorDetails, models::health::ApiHealthStatus};

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthErrorResponse {
    status: &'static str,
    error: &'static str,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    match service.get_status().await {
        Ok(status) => Json(ApiHealthStatus::from(status)).into_response(),
        Err(err) => {
            error!("Health check failed: {err:#}");
            let mut response = (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthErrorResponse {
                    status: "error",
                    error: "Health check failed",
                }),
            )
                .into_response();
            response
                .extensions_mut()
                .insert(ErrorDetails(err.to_string()));
            response
        }
    }
}
