use std::future::Future;

use chrono::{DateTime, Utc};
use microcuenca_email_contracts::EmailSendError;
use microcuenca_models::{contact::ContactSubmission, tracking::TrackingId};
use thiserror::Error;

/// Sends the primary notification to the project and the confirmation back to
/// the person who submitted the contact form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDispatchService: Send + Sync + 'static {
    /// Sends the primary email to the project inbox.
    fn send_primary(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<PrimaryDispatch, ContactDispatchError>> + Send;

    /// Sends the confirmation email to the submitter.
    ///
    /// Never fails, a failed send is reported as [`ConfirmationDispatch::Failed`].
    fn send_confirmation(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = ConfirmationDispatch> + Send;

    /// Sends the primary email and, only if that succeeded, the confirmation
    /// email.
    fn process(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<DispatchOutcome, ContactDispatchError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub primary: PrimaryDispatch,
    pub confirmation: ConfirmationDispatch,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryDispatch {
    pub message_id: String,
    pub tracking_id: TrackingId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationDispatch {
    Sent { message_id: String },
    Disabled,
    Failed { error: String },
}

impl ConfirmationDispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// Why no confirmation has been sent.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Sent { .. } => None,
            Self::Disabled => Some("confirmation_disabled"),
            Self::Failed { .. } => Some("confirmation_failed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactDispatchError {
    #[error("The email provider quota has been exceeded.")]
    QuotaExceeded(#[source] EmailSendError),
    #[error("Failed to send the primary email.")]
    Send(#[source] EmailSendError),
}

impl ContactDispatchError {
    /// Statuses the provider answers with once the quota is used up.
    pub const QUOTA_STATUSES: [u16; 2] = [402, 429];
}

impl From<EmailSendError> for ContactDispatchError {
    fn from(err: EmailSendError) -> Self {
        match err.status() {
            Some(status) if Self::QUOTA_STATUSES.contains(&status) => Self::QuotaExceeded(err),
            _ => Self::Send(err),
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactDispatchService {
    pub fn with_process(
        mut self,
        submission: ContactSubmission,
        result: Result<DispatchOutcome, ContactDispatchError>,
    ) -> Self {
        self.expect_process()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason() {
        assert_eq!(
            ConfirmationDispatch::Sent {
                message_id: "OK".into()
            }
            .reason(),
            None
        );
        assert_eq!(
            ConfirmationDispatch::Disabled.reason(),
            Some("confirmation_disabled")
        );
        assert_eq!(
            ConfirmationDispatch::Failed {
                error: "boom".into()
            }
            .reason(),
            Some("confirmation_failed")
        );
    }

    #[test]
    fn quota_errors() {
        for (status, quota) in [(402, true), (429, true), (400, false), (500, false)] {
            let err = ContactDispatchError::from(EmailSendError::Rejected {
                status,
                text: "error".into(),
            });
            assert_eq!(
                matches!(err, ContactDispatchError::QuotaExceeded(_)),
                quota
            );
        }

        let err = ContactDispatchError::from(EmailSendError::NotInitialized);
        assert!(matches!(err, ContactDispatchError::Send(_)));
    }
}
