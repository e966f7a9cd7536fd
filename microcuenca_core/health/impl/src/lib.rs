use std::sync::Arc;

use anyhow::Context;
use microcuenca_core_health_contracts::{HealthFeatureService, HealthStatus};
use microcuenca_email_contracts::EmailService;
use microcuenca_shared_contracts::{process::ProcessService, time::TimeService};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, Process, Email> {
    time: Time,
    process: Process,
    email: Email,
    config: HealthFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub environment: Arc<str>,
}

impl<Time, Process, Email> HealthFeatureServiceImpl<Time, Process, Email> {
    pub fn new(time: Time, process: Process, email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            time,
            process,
            email,
            config,
        }
    }
}

impl<Time, Process, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Process, Email>
where
    Time: TimeService,
    Process: ProcessService,
    Email: EmailService,
{
    #[tracing::instrument(skip_all)]
    async fn get_status(&self) -> anyhow::Result<HealthStatus> {
        let memory = self
            .process
            .memory_usage()
            .context("Failed to read memory usage")?;

        let email_configured = self.email.is_initialized();
        if !email_configured {
            warn!("Email transport is not configured");
        }

        Ok(HealthStatus {
            environment: self.config.environment.to_string(),
            timestamp: self.time.now(),
            uptime: self.process.uptime().as_secs(),
            memory,
            email_configured,
        })
    }
}
