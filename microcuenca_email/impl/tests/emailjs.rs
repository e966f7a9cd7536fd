use std::time::Duration;

use microcuenca_config::EmailConfig;
use microcuenca_email_contracts::{EmailReceipt, EmailSendError, EmailService};
use microcuenca_email_impl::{EmailServiceConfig, EmailServiceImpl};
use microcuenca_models::email::TemplateParams;
use microcuenca_testing::emailjs::{self, EmailJsCredentials};
use microcuenca_utils::assert_matches;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn send() {
    let (sut, template_id) = make_sut(Keys::Valid).await;

    let result = sut.send(template_id, params()).await.unwrap();

    assert_eq!(
        result,
        EmailReceipt {
            status: 200,
            text: "OK".into()
        }
    );
}

#[tokio::test]
async fn rejected_template() {
    let (sut, _) = make_sut(Keys::Valid).await;

    let result = sut.send("fail".into(), params()).await;

    assert_matches!(
        result,
        Err(EmailSendError::Rejected { status: 400, text })
            if text == "The template ID is invalid"
    );
}

#[tokio::test]
async fn quota_exceeded() {
    let (sut, _) = make_sut(Keys::Valid).await;

    let result = sut.send("quota".into(), params()).await;

    assert_eq!(result.unwrap_err().status(), Some(402));
}

#[tokio::test]
async fn invalid_private_key() {
    let (sut, template_id) = make_sut(Keys::WrongPrivateKey).await;

    let result = sut.send(template_id, params()).await;

    assert_matches!(result, Err(EmailSendError::Rejected { status: 403, .. }));
}

#[tokio::test]
async fn stalled_provider() {
    let (sut, _) = make_sut_with_timeout(Keys::Valid, Duration::from_millis(200)).await;

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        sut.send(emailjs::STALL_TEMPLATE.into(), params()),
    )
    .await
    .expect("send did not give up on the stalled provider");

    assert_matches!(result, Err(EmailSendError::Other(_)));
}

#[tokio::test]
async fn unreachable() {
    let config = microcuenca_config::load_dev_config().unwrap();
    let sut = EmailServiceImpl::new(EmailServiceConfig::new(
        Some("http://127.0.0.1:1/api/v1.0/email/send".parse().unwrap()),
        config.email.service_id.unwrap(),
        config.email.public_key,
        config.email.private_key,
        config.email.timeout.0,
    ));

    let result = sut.send("template".into(), params()).await;

    assert_matches!(result, Err(EmailSendError::Other(_)));
}

enum Keys {
    Valid,
    WrongPrivateKey,
}

fn params() -> TemplateParams {
    TemplateParams::new()
        .with("to_email", "proyecto@example.com")
        .with("nombre_completo", "Juan Pérez")
}

async fn make_sut(keys: Keys) -> (EmailServiceImpl, String) {
    let timeout = microcuenca_config::load_dev_config().unwrap().email.timeout.0;
    make_sut_with_timeout(keys, timeout).await
}

async fn make_sut_with_timeout(keys: Keys, timeout: Duration) -> (EmailServiceImpl, String) {
    let config = microcuenca_config::load_dev_config().unwrap();

    let EmailConfig {
        public_key,
        private_key,
        service_id,
        template_id,
        ..
    } = config.email;
    let service_id = service_id.unwrap();

    let endpoint = emailjs::spawn_server(EmailJsCredentials {
        public_key: public_key.clone().unwrap(),
        private_key: private_key.clone().unwrap(),
        service_id: service_id.clone(),
    })
    .await
    .unwrap();

    let private_key = match keys {
        Keys::Valid => private_key,
        Keys::WrongPrivateKey => Some("wrong".into()),
    };

    let config = EmailServiceConfig::new(
        Some(endpoint.parse().unwrap()),
        service_id,
        public_key,
        private_key,
        timeout,
    );

    (EmailServiceImpl::new(config), template_id.unwrap())
}
