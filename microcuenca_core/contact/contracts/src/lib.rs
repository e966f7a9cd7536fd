use std::future::Future;

use chrono::{DateTime, Utc};
use microcuenca_models::{contact::ContactSubmission, stats::ContactStats, tracking::TrackingId};
use thiserror::Error;

pub mod dispatch;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Sends the emails for a validated contact submission and records the
    /// outcome in the statistics.
    fn process_submission(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactReceipt, ContactProcessError>> + Send;

    /// Returns the statistics of this server process.
    fn get_stats(&self) -> impl Future<Output = anyhow::Result<ContactStats>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    pub tracking_id: TrackingId,
    pub confirmation_sent: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ContactProcessError {
    #[error("The email quota has been exceeded.")]
    QuotaExceeded,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_process_submission(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactReceipt, ContactProcessError>,
    ) -> Self {
        self.expect_process_submission()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get_stats(mut self, result: anyhow::Result<ContactStats>) -> Self {
        self.expect_get_stats()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
