use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use microcuenca_utils::microcuenca_version;
use serde::Serialize;
use tracing::warn;

use crate::{
    errors::{error, ApiError, ErrorCode},
    models::ApiTimestamp,
};

const AVAILABLE_ENDPOINTS: &[&str] = &[
    "POST /api/contact",
    "GET /api/health",
    "GET /api/config",
    "GET /api/stats",
];

pub fn router() -> Router<()> {
    Router::new()
        .route("/", routing::get(banner))
        .route("/api", routing::get(api_info))
        .route("/api/", routing::get(api_info))
}

#[derive(Serialize)]
struct Banner {
    message: &'static str,
    version: &'static str,
    status: &'static str,
    api: &'static str,
    health: &'static str,
    timestamp: ApiTimestamp,
}

#[derive(Serialize)]
struct ApiInfo {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    endpoints: Endpoints,
    documentation: &'static str,
    timestamp: ApiTimestamp,
}

#[derive(Serialize)]
struct Endpoints {
    contact: &'static str,
    config: &'static str,
    health: &'static str,
    stats: &'static str,
}

async fn banner() -> Response {
    Json(Banner {
        message: "🌿 API del Proyecto de Conservación de Microcuenca",
        version: microcuenca_version(),
        status: "running",
        api: "/api",
        health: "/api/health",
        timestamp: ApiTimestamp::now(),
    })
    .into_response()
}

async fn api_info() -> Response {
    Json(ApiInfo {
        name: "Microcuenca Email API",
        version: microcuenca_version(),
        description: "API para gestión de emails del proyecto de conservación de microcuenca",
        endpoints: Endpoints {
            contact: "POST /api/contact",
            config: "GET /api/config",
            health: "GET /api/health",
            stats: "GET /api/stats",
        },
        documentation: env!("CARGO_PKG_HOMEPAGE"),
        timestamp: ApiTimestamp::now(),
    })
    .into_response()
}

pub async fn not_found(method: Method, uri: Uri) -> Response {
    warn!(%method, %uri, "Route not found");
    error(
        StatusCode::NOT_FOUND,
        ApiError {
            available_endpoints: Some(AVAILABLE_ENDPOINTS),
            ..ApiError::new(ErrorCode::NotFound, "Endpoint no encontrado")
        },
    )
}
