use std::future::Future;

use microcuenca_models::email::TemplateParams;
use thiserror::Error;

/// Sends templated emails through a transactional email provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Whether the provider credentials are configured.
    fn is_initialized(&self) -> bool;

    /// Renders the template `template_id` with `params` and sends the
    /// resulting email.
    fn send(
        &self,
        template_id: String,
        params: TemplateParams,
    ) -> impl Future<Output = Result<EmailReceipt, EmailSendError>> + Send;
}

/// Response of the provider to an accepted email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub status: u16,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("The email service has not been initialized.")]
    NotInitialized,
    #[error("The email provider rejected the email with status {status}: {text}")]
    Rejected { status: u16, text: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmailSendError {
    /// The http status returned by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::NotInitialized | Self::Other(_) => None,
        }
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_is_initialized(mut self, result: bool) -> Self {
        self.expect_is_initialized().once().return_const(result);
        self
    }

    pub fn with_send(
        mut self,
        template_id: String,
        params: TemplateParams,
        result: Result<EmailReceipt, EmailSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(template_id),
                mockall::predicate::eq(params),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
