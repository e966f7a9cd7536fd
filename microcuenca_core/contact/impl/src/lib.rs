use std::sync::Arc;

use chrono::{DateTime, Utc};
use microcuenca_core_contact_contracts::{
    dispatch::{ContactDispatchError, ContactDispatchService},
    ContactFeatureService, ContactProcessError, ContactReceipt,
};
use microcuenca_models::{
    contact::ContactSubmission,
    stats::{ContactStats, LastEmail, Uptime},
};
use microcuenca_shared_contracts::process::ProcessService;
use microcuenca_utils::microcuenca_version;
use tracing::{error, info};

use crate::stats::{success_rate, StatsRegister};

mod date;
pub mod dispatch;
pub mod stats;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Dispatch, Process> {
    dispatch: Dispatch,
    process: Process,
    stats: Arc<StatsRegister>,
}

impl<Dispatch, Process> ContactFeatureServiceImpl<Dispatch, Process> {
    pub fn new(dispatch: Dispatch, process: Process, started_at: DateTime<Utc>) -> Self {
        Self {
            dispatch,
            process,
            stats: StatsRegister::new(started_at).into(),
        }
    }
}

impl<Dispatch, Process> ContactFeatureService for ContactFeatureServiceImpl<Dispatch, Process>
where
    Dispatch: ContactDispatchService,
    Process: ProcessService,
{
    #[tracing::instrument(skip_all)]
    async fn process_submission(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactReceipt, ContactProcessError> {
        let submission = submission.sanitize();

        info!(
            email = submission.email.as_str(),
            name = submission.name.as_str(),
            interest_type = ?submission.interest_type,
            is_uvg = submission.email.is_uvg(),
            "Processing contact submission"
        );

        let outcome = match self.dispatch.process(&submission).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.record_failure().await;
                let quota_exceeded = matches!(err, ContactDispatchError::QuotaExceeded(_));
                let err = anyhow::Error::new(err);
                error!(
                    email = submission.email.as_str(),
                    "Failed to process contact submission: {err:#}"
                );
                return Err(if quota_exceeded {
                    ContactProcessError::QuotaExceeded
                } else {
                    ContactProcessError::Other(err)
                });
            }
        };

        self.stats
            .record_success(LastEmail {
                timestamp: outcome.timestamp,
                email: submission.email,
                interest_type: submission.interest_type,
            })
            .await;

        let confirmation_sent = outcome.confirmation.is_sent();
        info!(
            tracking_id = %outcome.primary.tracking_id,
            confirmation_sent,
            confirmation_reason = outcome.confirmation.reason(),
            "Contact submission processed"
        );

        Ok(ContactReceipt {
            tracking_id: outcome.primary.tracking_id,
            confirmation_sent,
            timestamp: outcome.timestamp,
        })
    }

    #[tracing::instrument(skip_all)]
    async fn get_stats(&self) -> anyhow::Result<ContactStats> {
        let snapshot = self.stats.snapshot().await;
        let memory = self.process.memory_usage()?;
        let uptime = Uptime::from_seconds(self.process.uptime().as_secs());

        info!("Statistics requested");

        Ok(ContactStats {
            success_rate: success_rate(snapshot.emails_sent, snapshot.errors),
            emails_sent: snapshot.emails_sent,
            last_email: snapshot.last_email,
            service_started_at: snapshot.service_started_at,
            errors: snapshot.errors,
            uptime,
            memory,
            version: microcuenca_version().into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use microcuenca_core_contact_contracts::dispatch::{
        ConfirmationDispatch, DispatchOutcome, MockContactDispatchService, PrimaryDispatch,
    };
    use microcuenca_demo::{
        contact::{ANA, JUAN},
        NOW, SERVICE_STARTED_AT, TRACKING_ID_1,
    };
    use microcuenca_email_contracts::EmailSendError;
    use microcuenca_models::{contact::ContactMessage, stats::MemoryUsage};
    use microcuenca_shared_contracts::process::MockProcessService;
    use microcuenca_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = ContactFeatureServiceImpl<MockContactDispatchService, MockProcessService>;

    const MEMORY: MemoryUsage = MemoryUsage {
        rss: 48 * 1024 * 1024,
        virtual_memory: 512 * 1024 * 1024,
    };

    fn outcome(confirmation: ConfirmationDispatch) -> DispatchOutcome {
        DispatchOutcome {
            primary: PrimaryDispatch {
                message_id: "OK".into(),
                tracking_id: TRACKING_ID_1.clone(),
            },
            confirmation,
            timestamp: *NOW,
        }
    }

    fn rejected(status: u16) -> EmailSendError {
        EmailSendError::Rejected {
            status,
            text: "rejected".into(),
        }
    }

    #[tokio::test]
    async fn process_submission_ok() {
        // Arrange
        let dispatch = MockContactDispatchService::new().with_process(
            JUAN.clone(),
            Ok(outcome(ConfirmationDispatch::Sent {
                message_id: "OK".into(),
            })),
        );

        let sut = Sut::new(dispatch, MockProcessService::new(), *SERVICE_STARTED_AT);

        // Act
        let result = sut.process_submission(JUAN.clone()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactReceipt {
                tracking_id: TRACKING_ID_1.clone(),
                confirmation_sent: true,
                timestamp: *NOW,
            }
        );

        let snapshot = sut.stats.snapshot().await;
        assert_eq!(snapshot.emails_sent, 1);
        assert_eq!(snapshot.errors, 0);
        assert_eq!(
            snapshot.last_email,
            Some(LastEmail {
                timestamp: *NOW,
                email: JUAN.email.clone(),
                interest_type: JUAN.interest_type,
            })
        );
    }

    #[tokio::test]
    async fn process_submission_confirmation_disabled() {
        // Arrange
        let dispatch = MockContactDispatchService::new()
            .with_process(ANA.clone(), Ok(outcome(ConfirmationDispatch::Disabled)));

        let sut = Sut::new(dispatch, MockProcessService::new(), *SERVICE_STARTED_AT);

        // Act
        let result = sut.process_submission(ANA.clone()).await;

        // Assert
        assert!(!result.unwrap().confirmation_sent);
        assert_eq!(sut.stats.snapshot().await.emails_sent, 1);
    }

    #[tokio::test]
    async fn process_submission_sanitizes() {
        // Arrange
        let submission = ContactSubmission {
            message: Some(
                ContactMessage::try_new("Hola <script>alert(1)</script>mundo").unwrap(),
            ),
            ..ANA.clone()
        };
        let sanitized = ContactSubmission {
            message: Some(ContactMessage::try_new("Hola mundo").unwrap()),
            ..ANA.clone()
        };

        let dispatch = MockContactDispatchService::new()
            .with_process(sanitized, Ok(outcome(ConfirmationDispatch::Disabled)));

        let sut = Sut::new(dispatch, MockProcessService::new(), *SERVICE_STARTED_AT);

        // Act
        let result = sut.process_submission(submission).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn process_submission_send_failed() {
        // Arrange
        let dispatch = MockContactDispatchService::new().with_process(
            JUAN.clone(),
            Err(ContactDispatchError::Send(rejected(400))),
        );

        let sut = Sut::new(dispatch, MockProcessService::new(), *SERVICE_STARTED_AT);

        // Act
        let result = sut.process_submission(JUAN.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactProcessError::Other(_)));

        let snapshot = sut.stats.snapshot().await;
        assert_eq!(snapshot.emails_sent, 0);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.last_email, None);
    }

    #[tokio::test]
    async fn process_submission_quota_exceeded() {
        // Arrange
        let dispatch = MockContactDispatchService::new().with_process(
            JUAN.clone(),
            Err(ContactDispatchError::QuotaExceeded(rejected(429))),
        );

        let sut = Sut::new(dispatch, MockProcessService::new(), *SERVICE_STARTED_AT);

        // Act
        let result = sut.process_submission(JUAN.clone()).await;

        // Assert
        assert_matches!(result, Err(ContactProcessError::QuotaExceeded));
        assert_eq!(sut.stats.snapshot().await.errors, 1);
    }

    #[tokio::test]
    async fn get_stats_fresh() {
        // Arrange
        let process = MockProcessService::new()
            .with_memory_usage(MEMORY)
            .with_uptime(Duration::from_secs(95400));

        let sut = Sut::new(
            MockContactDispatchService::new(),
            process,
            *SERVICE_STARTED_AT,
        );

        // Act
        let result = sut.get_stats().await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactStats {
                emails_sent: 0,
                last_email: None,
                service_started_at: *SERVICE_STARTED_AT,
                errors: 0,
                uptime: Uptime {
                    seconds: 95400,
                    formatted: "1d 2h 30m".into(),
                },
                success_rate: "100".into(),
                memory: MEMORY,
                version: microcuenca_version().into(),
            }
        );
    }

    #[tokio::test]
    async fn get_stats_after_submissions() {
        // Arrange
        let dispatch = MockContactDispatchService::new()
            .with_process(
                JUAN.clone(),
                Ok(outcome(ConfirmationDispatch::Disabled)),
            )
            .with_process(ANA.clone(), Err(ContactDispatchError::Send(rejected(400))));
        let process = MockProcessService::new()
            .with_memory_usage(MEMORY)
            .with_uptime(Duration::from_secs(60));

        let sut = Sut::new(dispatch, process, *SERVICE_STARTED_AT);
        sut.process_submission(JUAN.clone()).await.unwrap();
        sut.process_submission(ANA.clone()).await.unwrap_err();

        // Act
        let result = sut.get_stats().await.unwrap();

        // Assert
        assert_eq!(result.emails_sent, 1);
        assert_eq!(result.errors, 1);
        assert_eq!(result.success_rate, "50.00");
        assert_eq!(
            result.last_email.map(|last| last.email),
            Some(JUAN.email.clone())
        );
        assert_eq!(result.uptime.formatted, "0d 0h 1m");
    }
}
