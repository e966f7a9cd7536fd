use std::{sync::Arc, time::Duration};

use anyhow::Context;
use microcuenca_email_contracts::{EmailReceipt, EmailSendError, EmailService};
use microcuenca_models::email::TemplateParams;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::http::HttpClient;

mod http;

const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// [`EmailService`] backed by the EmailJS REST api.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    endpoint: Arc<Url>,
    service_id: Arc<str>,
    credentials: Option<Arc<EmailJsCredentials>>,
    timeout: Duration,
}

#[derive(Debug)]
struct EmailJsCredentials {
    public_key: String,
    private_key: String,
}

impl EmailServiceConfig {
    /// The service is only initialized if both keys are present and not empty.
    pub fn new(
        endpoint_override: Option<Url>,
        service_id: String,
        public_key: Option<String>,
        private_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let credentials = public_key
            .filter(|key| !key.is_empty())
            .zip(private_key.filter(|key| !key.is_empty()))
            .map(|(public_key, private_key)| {
                EmailJsCredentials {
                    public_key,
                    private_key,
                }
                .into()
            });

        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
            service_id: service_id.into(),
            credentials,
            timeout,
        }
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> Self {
        Self {
            client: HttpClient::new(config.timeout),
            config,
        }
    }
}

impl EmailService for EmailServiceImpl {
    fn is_initialized(&self) -> bool {
        self.config.credentials.is_some()
    }

    #[tracing::instrument(skip(self, params))]
    async fn send(
        &self,
        template_id: String,
        params: TemplateParams,
    ) -> Result<EmailReceipt, EmailSendError> {
        let Some(credentials) = &self.config.credentials else {
            return Err(EmailSendError::NotInitialized);
        };

        trace!(?params, "send email");

        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SendRequest {
                service_id: &self.config.service_id,
                template_id: &template_id,
                user_id: &credentials.public_key,
                access_token: &credentials.private_key,
                template_params: &params,
            })
            .send()
            .await
            .context("Failed to send request to EmailJS")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read EmailJS response")?;

        if !status.is_success() {
            return Err(EmailSendError::Rejected {
                status: status.as_u16(),
                text,
            });
        }

        debug!(%status, %text, "email accepted");

        Ok(EmailReceipt {
            status: status.as_u16(),
            text,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken")]
    access_token: &'a str,
    template_params: &'a TemplateParams,
}

#[cfg(test)]
mod tests {
    use microcuenca_utils::assert_matches;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn initialized() {
        let config = EmailServiceConfig::new(
            None,
            "service".into(),
            Some("public".into()),
            Some("private".into()),
            TIMEOUT,
        );
        assert!(EmailServiceImpl::new(config).is_initialized());
    }

    #[test]
    fn not_initialized() {
        for (public_key, private_key) in [
            (None, Some("private".into())),
            (Some("public".into()), None),
            (Some(String::new()), Some("private".into())),
        ] {
            let config = EmailServiceConfig::new(
                None,
                "service".into(),
                public_key,
                private_key,
                TIMEOUT,
            );
            assert!(!EmailServiceImpl::new(config).is_initialized());
        }
    }

    #[tokio::test]
    async fn send_not_initialized() {
        // Arrange
        let config = EmailServiceConfig::new(None, "service".into(), None, None, TIMEOUT);
        let sut = EmailServiceImpl::new(config);

        // Act
        let result = sut.send("template".into(), TemplateParams::new()).await;

        // Assert
        assert_matches!(result, Err(EmailSendError::NotInitialized));
    }

    #[test]
    fn default_endpoint() {
        let config = EmailServiceConfig::new(None, "service".into(), None, None, TIMEOUT);
        assert_eq!(config.endpoint.as_str(), SEND_ENDPOINT);
    }
}
