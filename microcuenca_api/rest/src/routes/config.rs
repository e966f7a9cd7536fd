use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use microcuenca_core_config_contracts::ConfigFeatureService;
use serde::Serialize;
use tracing::info;

use crate::{
    extractors::user_agent::UserAgent,
    models::{config::ApiPublicConfig, ApiTimestamp},
};

pub fn router(service: Arc<impl ConfigFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/config", routing::get(get_config))
        .with_state(service)
}

#[derive(Serialize)]
struct ConfigResponse {
    success: bool,
    config: ApiPublicConfig,
    timestamp: ApiTimestamp,
}

async fn get_config(
    service: State<Arc<impl ConfigFeatureService>>,
    UserAgent(user_agent): UserAgent,
) -> Response {
    info!(?user_agent, "Public config requested");

    Json(ConfigResponse {
        success: true,
        config: service.get_public_config().into(),
        timestamp: ApiTimestamp::now(),
    })
    .into_response()
}
