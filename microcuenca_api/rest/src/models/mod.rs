use chrono::{DateTime, SecondsFormat, Utc};
use microcuenca_models::stats::MemoryUsage;
use serde::{Serialize, Serializer};

pub mod config;
pub mod contact;
pub mod health;

/// RFC 3339 timestamp in UTC with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimestamp(pub DateTime<Utc>);

impl ApiTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl From<DateTime<Utc>> for ApiTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Serialize for ApiTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Memory usage of the server process in bytes.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMemoryUsage {
    pub rss: u64,
    pub virtual_memory: u64,
}

impl From<MemoryUsage> for ApiMemoryUsage {
    fn from(value: MemoryUsage) -> Self {
        Self {
            rss: value.rss,
            virtual_memory: value.virtual_memory,
        }
    }
}
