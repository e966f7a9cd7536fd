use microcuenca_core_health_contracts::HealthStatus;
use microcuenca_utils::microcuenca_version;
use serde::Serialize;

use super::{ApiMemoryUsage, ApiTimestamp};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub email_service: &'static str,
    pub environment: String,
    pub timestamp: ApiTimestamp,
    /// Seconds since the server process started.
    pub uptime: u64,
    pub memory: ApiMemoryUsage,
    pub checks: ApiHealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiHealthChecks {
    #[serde(rename = "emailjsConfig")]
    pub emailjs_config: bool,
    #[serde(rename = "externalAPIs")]
    pub external_apis: &'static str,
}

impl From<HealthStatus> for ApiHealthStatus {
    fn from(value: HealthStatus) -> Self {
        Self {
            status: "ok",
            service: HealthStatus::SERVICE_NAME,
            version: microcuenca_version(),
            email_service: HealthStatus::EMAIL_SERVICE,
            environment: value.environment,
            timestamp: value.timestamp.into(),
            uptime: value.uptime,
            memory: value.memory.into(),
            checks: ApiHealthChecks {
                emailjs_config: value.email_configured,
                external_apis: "ok",
            },
        }
    }
}
