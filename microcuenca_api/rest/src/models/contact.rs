use microcuenca_core_contact_contracts::ContactReceipt;
use microcuenca_models::{
    catalog::InterestType,
    contact::ContactEmail,
    stats::{ContactStats, LastEmail, Uptime},
    tracking::TrackingId,
};
use serde::Serialize;

use super::{ApiMemoryUsage, ApiTimestamp};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactReceipt {
    pub tracking_id: TrackingId,
    pub confirmation_sent: bool,
    pub timestamp: ApiTimestamp,
}

impl From<ContactReceipt> for ApiContactReceipt {
    fn from(value: ContactReceipt) -> Self {
        Self {
            tracking_id: value.tracking_id,
            confirmation_sent: value.confirmation_sent,
            timestamp: value.timestamp.into(),
        }
    }
}

/// Counters of the contact submissions processed since the server started.
#[derive(Debug, Clone, Serialize)]
pub struct ApiContactStats {
    #[serde(rename = "emailsEnviados")]
    pub emails_sent: u64,
    #[serde(rename = "ultimoEmail")]
    pub last_email: Option<ApiLastEmail>,
    #[serde(rename = "inicioServicio")]
    pub service_started_at: ApiTimestamp,
    #[serde(rename = "errores")]
    pub errors: u64,
    pub uptime: ApiUptime,
    #[serde(rename = "tasaExito")]
    pub success_rate: String,
    #[serde(rename = "memoria")]
    pub memory: ApiMemoryUsage,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiLastEmail {
    pub timestamp: ApiTimestamp,
    pub email: ContactEmail,
    #[serde(rename = "tipoInteres")]
    pub interest_type: Option<InterestType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiUptime {
    pub seconds: u64,
    pub formatted: String,
}

impl From<ContactStats> for ApiContactStats {
    fn from(value: ContactStats) -> Self {
        Self {
            emails_sent: value.emails_sent,
            last_email: value.last_email.map(Into::into),
            service_started_at: value.service_started_at.into(),
            errors: value.errors,
            uptime: value.uptime.into(),
            success_rate: value.success_rate,
            memory: value.memory.into(),
            version: value.version,
        }
    }
}

impl From<LastEmail> for ApiLastEmail {
    fn from(value: LastEmail) -> Self {
        Self {
            timestamp: value.timestamp.into(),
            email: value.email,
            interest_type: value.interest_type,
        }
    }
}

impl From<Uptime> for ApiUptime {
    fn from(value: Uptime) -> Self {
        Self {
            seconds: value.seconds,
            formatted: value.formatted,
        }
    }
}
