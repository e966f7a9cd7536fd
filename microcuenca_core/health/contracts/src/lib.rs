use std::future::Future;

use chrono::{DateTime, Utc};
use microcuenca_models::stats::MemoryUsage;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthFeatureService: Send + Sync + 'static {
    fn get_status(&self) -> impl Future<Output = anyhow::Result<HealthStatus>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub environment: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server process started.
    pub uptime: u64,
    pub memory: MemoryUsage,
    /// Whether the email transport has credentials to send emails.
    pub email_configured: bool,
}

impl HealthStatus {
    pub const SERVICE_NAME: &'static str = "Proyecto Microcuenca Email Service";
    pub const EMAIL_SERVICE: &'static str = "EmailJS";
}

#[cfg(feature = "mock")]
impl MockHealthFeatureService {
    pub fn with_get_status(mut self, result: anyhow::Result<HealthStatus>) -> Self {
        self.expect_get_status()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
