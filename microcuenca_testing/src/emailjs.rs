//! Fake EmailJS server.
//!
//! Accepts every email sent with the configured credentials and service id,
//! except for a few template ids which trigger provider errors:
//!
//! | template id | response |
//! |---|---|
//! | `fail` | `400 The template ID is invalid` |
//! | `quota` | `402 Quota exceeded` |
//! | `ratelimit` | `429 Too many requests` |
//! | `stall` | never answers |

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// Template id for which the server accepts the request but never responds.
pub const STALL_TEMPLATE: &str = "stall";

#[derive(Debug, Clone)]
pub struct EmailJsCredentials {
    pub public_key: String,
    pub private_key: String,
    pub service_id: String,
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    credentials: EmailJsCredentials,
) -> anyhow::Result<()> {
    info!("Starting EmailJS testing server on {host}:{port}");
    info!("EmailJS send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Credentials: {credentials:?}");
    info!(
        "Template ids \"fail\", \"quota\" and \"ratelimit\" are rejected, \"stall\" never \
         answers, every other template id is accepted"
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(credentials))
        .await
        .context("Failed to start HTTP server")
}

/// Starts the server on a random local port in the background and returns the
/// url of its send endpoint.
pub async fn spawn_server(credentials: EmailJsCredentials) -> anyhow::Result<String> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .context("Failed to bind to random port")?;
    let address = listener.local_addr()?;

    tokio::spawn(async move { axum::serve(listener, router(credentials)).await });

    Ok(format!("http://{address}{SEND_ROUTE}"))
}

pub fn router(credentials: EmailJsCredentials) -> Router {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(credentials.into())
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    template_params: serde_json::Map<String, serde_json::Value>,
}

async fn send(
    state: State<Arc<EmailJsCredentials>>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    if request.user_id != state.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }
    if request.access_token.as_deref() != Some(state.private_key.as_str()) {
        return (StatusCode::FORBIDDEN, "The Private Key is invalid");
    }
    if request.service_id != state.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }

    match request.template_id.as_str() {
        "fail" => (StatusCode::BAD_REQUEST, "The template ID is invalid"),
        "quota" => (StatusCode::PAYMENT_REQUIRED, "Quota exceeded"),
        "ratelimit" => (StatusCode::TOO_MANY_REQUESTS, "Too many requests"),
        STALL_TEMPLATE => std::future::pending().await,
        template_id => {
            info!(
                template_id,
                params = %serde_json::Value::Object(request.template_params),
                "Email sent"
            );
            (StatusCode::OK, "OK")
        }
    }
}
