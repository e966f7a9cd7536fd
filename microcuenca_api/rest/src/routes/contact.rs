use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use microcuenca_core_contact_contracts::{ContactFeatureService, ContactProcessError};
use microcuenca_models::contact::ContactSubmission;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    errors::{error, internal_error, validation_error, ApiError, ErrorCode},
    extractors::{payload::JsonPayload, user_agent::UserAgent},
    middlewares::{client_ip::ClientIp, rate_limit},
    models::{
        contact::{ApiContactReceipt, ApiContactStats},
        ApiTimestamp,
    },
};

const EMAIL_SENT: &str = "Email enviado exitosamente";
const CONTACT_PROCESSING_ERROR: &str = "Error procesando solicitud de contacto";
const QUOTA_EXCEEDED: &str = "Límite de emails alcanzado. Intenta mañana.";
const STATS_ERROR: &str = "Error obteniendo estadísticas";

pub fn router(
    service: Arc<impl ContactFeatureService>,
    limiter: Arc<rate_limit::RateLimiter>,
) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit).layer(from_fn_with_state(limiter, rate_limit::middleware)),
        )
        .route("/api/contact/stats", routing::get(stats))
        .route("/api/stats", routing::get(stats))
        .with_state(service)
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
    data: ApiContactReceipt,
}

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    stats: ApiContactStats,
    timestamp: ApiTimestamp,
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    client_ip: Option<Extension<ClientIp>>,
    UserAgent(user_agent): UserAgent,
    JsonPayload(payload): JsonPayload,
) -> Response {
    let client_ip = client_ip.map(|Extension(ClientIp(ip))| ip);
    info!(?client_ip, ?user_agent, "Contact submission received");

    let submission = match ContactSubmission::validate(&payload) {
        Ok(submission) => submission,
        Err(err) => {
            warn!(?client_ip, errors = ?err.errors, "Invalid contact submission");
            return validation_error(err);
        }
    };

    match service.process_submission(submission).await {
        Ok(receipt) => Json(SubmitResponse {
            success: true,
            message: EMAIL_SENT,
            data: receipt.into(),
        })
        .into_response(),
        Err(ContactProcessError::QuotaExceeded) => error(
            StatusCode::TOO_MANY_REQUESTS,
            ApiError::new(ErrorCode::RateLimitExceeded, QUOTA_EXCEEDED),
        ),
        Err(ContactProcessError::Other(err)) => internal_error(
            err,
            ErrorCode::ContactProcessingError,
            CONTACT_PROCESSING_ERROR,
        ),
    }
}

async fn stats(service: State<Arc<impl ContactFeatureService>>) -> Response {
    match service.get_stats().await {
        Ok(stats) => Json(StatsResponse {
            success: true,
            stats: stats.into(),
            timestamp: ApiTimestamp::now(),
        })
        .into_response(),
        Err(err) => internal_error(err, ErrorCode::InternalError, STATS_ERROR),
    }
}
