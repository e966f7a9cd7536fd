use chrono::{DateTime, Utc};

use crate::{catalog::InterestType, contact::ContactEmail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStats {
    pub emails_sent: u64,
    pub last_email: Option<LastEmail>,
    pub service_started_at: DateTime<Utc>,
    pub errors: u64,
    pub uptime: Uptime,
    /// Percentage of successful submissions, formatted with two decimals.
    pub success_rate: String,
    pub memory: MemoryUsage,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastEmail {
    pub timestamp: DateTime<Utc>,
    pub email: ContactEmail,
    pub interest_type: Option<InterestType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uptime {
    pub seconds: u64,
    pub formatted: String,
}

impl Uptime {
    pub fn from_seconds(seconds: u64) -> Self {
        let days = seconds / 86400;
        let hours = seconds % 86400 / 3600;
        let minutes = seconds % 3600 / 60;
        Self {
            seconds,
            formatted: format!("{days}d {hours}h {minutes}m"),
        }
    }
}

/// Memory usage of the current process in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    pub rss: u64,
    pub virtual_memory: u64,
}
