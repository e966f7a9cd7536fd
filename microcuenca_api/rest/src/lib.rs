use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, Router};
use microcuenca_core_config_contracts::ConfigFeatureService;
use microcuenca_core_contact_contracts::ContactFeatureService;
use microcuenca_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::info;

use crate::middlewares::rate_limit::RateLimiter;

mod errors;
mod extractors;
mod middlewares;
mod models;
mod routes;

/// Maximum size of a request body in bytes.
pub const BODY_LIMIT: usize = 1024 * 1024;

const GENERAL_RATE_LIMIT_MESSAGE: &str =
    "Demasiadas solicitudes. Intenta nuevamente en unos minutos.";
const CONTACT_RATE_LIMIT_MESSAGE: &str =
    "Demasiadas solicitudes desde esta IP, por favor intente de nuevo después de una hora.";

#[derive(Debug, Clone)]
pub struct RestServer<Health, Config, Contact> {
    health: Health,
    config: Config,
    contact: Contact,
    settings: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub address: SocketAddr,
    pub cors_origins: Vec<String>,
    pub real_ip: Option<RealIpConfig>,
    /// Attach the top-level error message to internal error responses.
    pub expose_error_details: bool,
    /// Limit applied to every request of a client.
    pub rate_limit: RateLimitConfig,
    /// Limit applied to contact submissions of a client.
    pub contact_rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u64,
}

impl<Health, Config, Contact> RestServer<Health, Config, Contact>
where
    Health: HealthFeatureService,
    Config: ConfigFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, config: Config, contact: Contact, settings: RestServerConfig) -> Self {
        Self {
            health,
            config,
            contact,
            settings,
        }
    }

    pub async fn serve(
        self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let address = self.settings.address;
        let router = self.router();

        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind to {address}"))?;
        info!("Starting REST API server on {address}");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let RestServerConfig {
            address: _,
            cors_origins,
            real_ip,
            expose_error_details,
            rate_limit,
            contact_rate_limit,
        } = self.settings;

        let contact_limiter = RateLimiter::new(contact_rate_limit, CONTACT_RATE_LIMIT_MESSAGE);
        let general_limiter = RateLimiter::new(rate_limit, GENERAL_RATE_LIMIT_MESSAGE);

        let router = Router::new()
            .merge(routes::index::router())
            .merge(routes::health::router(self.health.into()))
            .merge(routes::config::router(self.config.into()))
            .merge(routes::contact::router(
                self.contact.into(),
                contact_limiter.into(),
            ))
            .fallback(routes::index::not_found);

        let router = router.layer(DefaultBodyLimit::max(BODY_LIMIT));
        let router = middlewares::rate_limit::add(general_limiter.into())(router);
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::error_details::add(expose_error_details)(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        let router = middlewares::client_ip::add(real_ip.map(Into::into))(router);

        middlewares::security_headers::add(router)
            .layer(middlewares::cors::layer(&cors_origins))
    }
}
