use chrono::{DateTime, Utc};
use microcuenca_models::stats::LastEmail;
use tokio::sync::RwLock;

/// In-memory counters of the contact submissions processed by this server
/// process.
#[derive(Debug, Default)]
pub struct StatsRegister {
    state: RwLock<StatsSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub emails_sent: u64,
    pub last_email: Option<LastEmail>,
    pub service_started_at: DateTime<Utc>,
    pub errors: u64,
}

impl StatsRegister {
    pub fn new(service_started_at: DateTime<Utc>) -> Self {
        Self {
            state: RwLock::new(StatsSnapshot {
                service_started_at,
                ..Default::default()
            }),
        }
    }

    pub async fn record_success(&self, last_email: LastEmail) {
        let mut state = self.state.write().await;
        state.emails_sent += 1;
        state.last_email = Some(last_email);
    }

    pub async fn record_failure(&self) {
        self.state.write().await.errors += 1;
    }

    pub async fn snapshot(&self) -> StatsSnapshot {
        self.state.read().await.clone()
    }
}

/// Percentage of successful submissions with two decimals, `"100"` if no
/// email has been sent yet.
pub fn success_rate(emails_sent: u64, errors: u64) -> String {
    if emails_sent == 0 {
        return "100".into();
    }

    let rate = emails_sent as f64 / (emails_sent + errors) as f64 * 100.0;
    format!("{rate:.2}")
}
