use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use microcuenca_core_contact_contracts::dispatch::{
    ConfirmationDispatch, ContactDispatchError, ContactDispatchService, DispatchOutcome,
    PrimaryDispatch,
};
use microcuenca_email_contracts::EmailService;
use microcuenca_models::{
    catalog::InterestType, contact::ContactSubmission, email::TemplateParams,
    tracking::TrackingId,
};
use microcuenca_shared_contracts::{time::TimeService, tracking::TrackingIdService};
use tracing::{error, info, warn};

use crate::date::format_local_date;

const NOT_PROVIDED: &str = "No proporcionado";
const NOT_SPECIFIED: &str = "No especificado";
const GENERAL_INFORMATION: &str = "Información general";
const NO_MESSAGE: &str = "Sin mensaje adicional";

#[derive(Debug, Clone)]
pub struct ContactDispatchServiceImpl<Time, TrackingIdS, Email> {
    time: Time,
    tracking_id: TrackingIdS,
    email: Email,
    config: ContactDispatchConfig,
}

#[derive(Debug, Clone)]
pub struct ContactDispatchConfig {
    pub template_id: Arc<str>,
    /// `None` if confirmation emails are disabled.
    pub confirmation_template_id: Option<Arc<str>>,
    pub project: Arc<ProjectInfo>,
}

/// How the project presents itself in emails.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub name: String,
    pub email: String,
    pub sender_name: String,
    pub university: String,
    pub utc_offset: FixedOffset,
}

impl<Time, TrackingIdS, Email> ContactDispatchServiceImpl<Time, TrackingIdS, Email> {
    pub fn new(
        time: Time,
        tracking_id: TrackingIdS,
        email: Email,
        config: ContactDispatchConfig,
    ) -> Self {
        Self {
            time,
            tracking_id,
            email,
            config,
        }
    }

    /// Parameters of the email notifying the project about a new submission.
    pub fn build_primary_params(
        &self,
        submission: &ContactSubmission,
        tracking_id: &TrackingId,
        now: DateTime<Utc>,
    ) -> TemplateParams {
        let project = &*self.config.project;
        let name = submission.name.as_str();
        let email = submission.email.as_str();

        TemplateParams::new()
            .with("to_email", &project.email)
            .with("from_name", name)
            .with("from_email", email)
            .with("reply_to", email)
            .with("nombre_completo", name)
            .with("email_contacto", email)
            .with(
                "telefono_contacto",
                submission
                    .phone
                    .as_deref()
                    .map_or(NOT_PROVIDED, String::as_str),
            )
            .with(
                "carrera_estudio",
                submission.program.map_or(NOT_PROVIDED, |p| p.label()),
            )
            .with(
                "anio_estudio",
                submission.study_year.map_or(NOT_SPECIFIED, |y| y.label()),
            )
            .with(
                "tipo_interes",
                submission
                    .interest_type
                    .map_or(GENERAL_INFORMATION, |i| i.label()),
            )
            .with(
                "mensaje_contacto",
                submission
                    .message
                    .as_deref()
                    .map_or(NO_MESSAGE, String::as_str),
            )
            .with(
                "fecha_solicitud",
                format_local_date(now, project.utc_offset),
            )
            .with("proyecto_nombre", &project.name)
            .with("universidad", &project.university)
            .with("tracking_id", tracking_id.as_str())
            .with("sender_service", &project.sender_name)
            .with(
                "timestamp",
                now.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
    }

    /// Parameters of the email confirming the submission to the submitter.
    pub fn build_confirmation_params(
        &self,
        submission: &ContactSubmission,
        now: DateTime<Utc>,
    ) -> TemplateParams {
        let project = &*self.config.project;

        TemplateParams::new()
            .with("to_email", submission.email.as_str())
            .with("to_name", submission.name.as_str())
            .with("proyecto_nombre", &project.name)
            .with("universidad", &project.university)
            .with("email_proyecto", &project.email)
            .with(
                "mensaje_confirmacion",
                InterestType::confirmation_message(submission.interest_type),
            )
            .with(
                "fecha_confirmacion",
                format_local_date(now, project.utc_offset),
            )
    }
}

impl<Time, TrackingIdS, Email> ContactDispatchServiceImpl<Time, TrackingIdS, Email>
where
    Time: TimeService,
    TrackingIdS: TrackingIdService,
    Email: EmailService,
{
    async fn send_primary_at(
        &self,
        submission: &ContactSubmission,
        now: DateTime<Utc>,
    ) -> Result<PrimaryDispatch, ContactDispatchError> {
        let tracking_id = self.tracking_id.generate();
        let params = self.build_primary_params(submission, &tracking_id, now);

        info!(
            to = %self.config.project.email,
            from = submission.email.as_str(),
            %tracking_id,
            "Sending primary email"
        );

        let receipt = self
            .email
            .send(self.config.template_id.to_string(), params)
            .await
            .inspect_err(|err| {
                error!(
                    status = ?err.status(),
                    %tracking_id,
                    "Failed to send primary email: {err:#}"
                )
            })?;

        info!(status = receipt.status, %tracking_id, "Primary email sent");

        Ok(PrimaryDispatch {
            message_id: receipt.text,
            tracking_id,
        })
    }

    async fn send_confirmation_at(
        &self,
        submission: &ContactSubmission,
        now: DateTime<Utc>,
    ) -> ConfirmationDispatch {
        let Some(template_id) = self
            .config
            .confirmation_template_id
            .as_deref()
            .filter(|_| submission.send_confirmation)
        else {
            info!("Confirmation email disabled");
            return ConfirmationDispatch::Disabled;
        };

        let params = self.build_confirmation_params(submission, now);

        info!(to = submission.email.as_str(), "Sending confirmation email");

        match self.email.send(template_id.into(), params).await {
            Ok(receipt) => {
                info!(
                    status = receipt.status,
                    to = submission.email.as_str(),
                    "Confirmation email sent"
                );
                ConfirmationDispatch::Sent {
                    message_id: receipt.text,
                }
            }
            Err(err) => {
                warn!(
                    to = submission.email.as_str(),
                    "Failed to send confirmation email (not critical): {err}"
                );
                ConfirmationDispatch::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}

impl<Time, TrackingIdS, Email> ContactDispatchService
    for ContactDispatchServiceImpl<Time, TrackingIdS, Email>
where
    Time: TimeService,
    TrackingIdS: TrackingIdService,
    Email: EmailService,
{
    #[tracing::instrument(skip_all)]
    async fn send_primary(
        &self,
        submission: &ContactSubmission,
    ) -> Result<PrimaryDispatch, ContactDispatchError> {
        self.send_primary_at(submission, self.time.now()).await
    }

    #[tracing::instrument(skip_all)]
    async fn send_confirmation(&self, submission: &ContactSubmission) -> ConfirmationDispatch {
        self.send_confirmation_at(submission, self.time.now()).await
    }

    #[tracing::instrument(skip_all)]
    async fn process(
        &self,
        submission: &ContactSubmission,
    ) -> Result<DispatchOutcome, ContactDispatchError> {
        let now = self.time.now();

        let primary = self.send_primary_at(submission, now).await?;
        let confirmation = self.send_confirmation_at(submission, now).await;

        Ok(DispatchOutcome {
            primary,
            confirmation,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use microcuenca_demo::{
        contact::{ANA, JUAN},
        NOW, TRACKING_ID_1,
    };
    use microcuenca_email_contracts::{EmailReceipt, EmailSendError, MockEmailService};
    use microcuenca_shared_contracts::{
        time::MockTimeService, tracking::MockTrackingIdService,
    };
    use microcuenca_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = ContactDispatchServiceImpl<MockTimeService, MockTrackingIdService, MockEmailService>;

    const TEMPLATE: &str = "template";
    const CONFIRMATION_TEMPLATE: &str = "confirmation-template";

    fn config(confirmation: bool) -> ContactDispatchConfig {
        ContactDispatchConfig {
            template_id: TEMPLATE.into(),
            confirmation_template_id: confirmation.then(|| CONFIRMATION_TEMPLATE.into()),
            project: ProjectInfo {
                name: "Microcuencas".into(),
                email: "proyecto@uvg.edu.gt".into(),
                sender_name: "Proyecto de Microcuencas".into(),
                university: "Universidad del Valle de Guatemala".into(),
                utc_offset: FixedOffset::west_opt(6 * 3600).unwrap(),
            }
            .into(),
        }
    }

    fn sut(config: ContactDispatchConfig) -> Sut {
        ContactDispatchServiceImpl {
            time: MockTimeService::new(),
            tracking_id: MockTrackingIdService::new(),
            email: MockEmailService::new(),
            config,
        }
    }

    fn receipt() -> EmailReceipt {
        EmailReceipt {
            status: 200,
            text: "OK".into(),
        }
    }

    fn primary_params(submission: &ContactSubmission) -> TemplateParams {
        sut(config(true)).build_primary_params(submission, &TRACKING_ID_1, *NOW)
    }

    fn confirmation_params(submission: &ContactSubmission) -> TemplateParams {
        sut(config(true)).build_confirmation_params(submission, *NOW)
    }

    #[test]
    fn build_primary_params() {
        // Act
        let result = primary_params(&JUAN);

        // Assert
        let expected = [
            ("to_email", "proyecto@uvg.edu.gt"),
            ("from_name", "Juan Pérez"),
            ("from_email", "juan.perez@uvg.edu.gt"),
            ("reply_to", "juan.perez@uvg.edu.gt"),
            ("nombre_completo", "Juan Pérez"),
            ("email_contacto", "juan.perez@uvg.edu.gt"),
            ("telefono_contacto", "2234-5678"),
            (
                "carrera_estudio",
                "Ingeniería en Ciencia de la Computación y TI",
            ),
            ("anio_estudio", "Tercer año"),
            ("tipo_interes", "Voluntario en trabajo de campo"),
            (
                "mensaje_contacto",
                "Me gustaría participar en las jornadas de reforestación.",
            ),
            ("fecha_solicitud", "19 de octubre de 2026, 02:05 p. m."),
            ("proyecto_nombre", "Microcuencas"),
            ("universidad", "Universidad del Valle de Guatemala"),
            ("tracking_id", "MC_1792440300000_k3j9x0abc"),
            ("sender_service", "Proyecto de Microcuencas"),
            ("timestamp", "2026-10-19T20:05:00.000Z"),
        ]
        .into_iter()
        .collect::<TemplateParams>();
        assert_eq!(result, expected);
    }

    #[test]
    fn build_primary_params_defaults() {
        let result = primary_params(&ANA);

        assert_eq!(result.get("telefono_contacto"), Some("No proporcionado"));
        assert_eq!(result.get("carrera_estudio"), Some("No proporcionado"));
        assert_eq!(result.get("anio_estudio"), Some("No especificado"));
        assert_eq!(result.get("tipo_interes"), Some("Información general"));
        assert_eq!(result.get("mensaje_contacto"), Some("Sin mensaje adicional"));
    }

    #[test]
    fn build_confirmation_params() {
        // Act
        let result = confirmation_params(&JUAN);

        // Assert
        let expected = [
            ("to_email", "juan.perez@uvg.edu.gt"),
            ("to_name", "Juan Pérez"),
            ("proyecto_nombre", "Microcuencas"),
            ("universidad", "Universidad del Valle de Guatemala"),
            ("email_proyecto", "proyecto@uvg.edu.gt"),
            (
                "mensaje_confirmacion",
                "Te contactaremos para coordinar actividades de campo y conservación.",
            ),
            ("fecha_confirmacion", "19 de octubre de 2026, 02:05 p. m."),
        ]
        .into_iter()
        .collect::<TemplateParams>();
        assert_eq!(result, expected);
    }

    #[test]
    fn build_confirmation_params_default_message() {
        let result = confirmation_params(&ANA);

        assert_eq!(
            result.get("mensaje_confirmacion"),
            Some(InterestType::DEFAULT_CONFIRMATION_MESSAGE)
        );
    }

    #[tokio::test]
    async fn process_ok() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let tracking_id = MockTrackingIdService::new().with_generate(TRACKING_ID_1.clone());
        let email = MockEmailService::new()
            .with_send(TEMPLATE.into(), primary_params(&JUAN), Ok(receipt()))
            .with_send(
                CONFIRMATION_TEMPLATE.into(),
                confirmation_params(&JUAN),
                Ok(receipt()),
            );

        let sut = ContactDispatchServiceImpl {
            time,
            tracking_id,
            email,
            config: config(true),
        };

        // Act
        let result = sut.process(&JUAN).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            DispatchOutcome {
                primary: PrimaryDispatch {
                    message_id: "OK".into(),
                    tracking_id: TRACKING_ID_1.clone(),
                },
                confirmation: ConfirmationDispatch::Sent {
                    message_id: "OK".into()
                },
                timestamp: *NOW,
            }
        );
    }

    #[tokio::test]
    async fn process_confirmation_fails() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let tracking_id = MockTrackingIdService::new().with_generate(TRACKING_ID_1.clone());
        let email = MockEmailService::new()
            .with_send(TEMPLATE.into(), primary_params(&JUAN), Ok(receipt()))
            .with_send(
                CONFIRMATION_TEMPLATE.into(),
                confirmation_params(&JUAN),
                Err(EmailSendError::Rejected {
                    status: 400,
                    text: "The template ID is invalid".into(),
                }),
            );

        let sut = ContactDispatchServiceImpl {
            time,
            tracking_id,
            email,
            config: config(true),
        };

        // Act
        let result = sut.process(&JUAN).await;

        // Assert
        let outcome = result.unwrap();
        assert_eq!(outcome.primary.tracking_id, *TRACKING_ID_1);
        assert_matches!(outcome.confirmation, ConfirmationDispatch::Failed { .. });
        assert_eq!(outcome.confirmation.reason(), Some("confirmation_failed"));
    }

    #[tokio::test]
    async fn process_primary_fails() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let tracking_id = MockTrackingIdService::new().with_generate(TRACKING_ID_1.clone());
        let email = MockEmailService::new().with_send(
            TEMPLATE.into(),
            primary_params(&JUAN),
            Err(EmailSendError::Rejected {
                status: 400,
                text: "The service ID is invalid".into(),
            }),
        );

        let sut = ContactDispatchServiceImpl {
            time,
            tracking_id,
            email,
            config: config(true),
        };

        // Act
        let result = sut.process(&JUAN).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactDispatchError::Send(EmailSendError::Rejected {
                status: 400,
                ..
            }))
        );
    }

    #[tokio::test]
    async fn process_quota_exceeded() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let tracking_id = MockTrackingIdService::new().with_generate(TRACKING_ID_1.clone());
        let email = MockEmailService::new().with_send(
            TEMPLATE.into(),
            primary_params(&JUAN),
            Err(EmailSendError::Rejected {
                status: 402,
                text: "Quota exceeded".into(),
            }),
        );

        let sut = ContactDispatchServiceImpl {
            time,
            tracking_id,
            email,
            config: config(true),
        };

        // Act
        let result = sut.process(&JUAN).await;

        // Assert
        assert_matches!(result, Err(ContactDispatchError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn process_not_initialized() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let tracking_id = MockTrackingIdService::new().with_generate(TRACKING_ID_1.clone());
        let email = MockEmailService::new().with_send(
            TEMPLATE.into(),
            primary_params(&JUAN),
            Err(EmailSendError::NotInitialized),
        );

        let sut = ContactDispatchServiceImpl {
            time,
            tracking_id,
            email,
            config: config(true),
        };

        // Act
        let result = sut.process(&JUAN).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactDispatchError::Send(EmailSendError::NotInitialized))
        );
    }

    #[tokio::test]
    async fn confirmation_disabled_by_config() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);

        let sut = ContactDispatchServiceImpl {
            time,
            ..sut(config(false))
        };

        // Act
        let result = sut.send_confirmation(&JUAN).await;

        // Assert
        assert_eq!(result, ConfirmationDispatch::Disabled);
        assert_eq!(result.reason(), Some("confirmation_disabled"));
    }

    #[tokio::test]
    async fn confirmation_opted_out() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let submission = ContactSubmission {
            send_confirmation: false,
            ..JUAN.clone()
        };

        let sut = ContactDispatchServiceImpl {
            time,
            ..sut(config(true))
        };

        // Act
        let result = sut.send_confirmation(&submission).await;

        // Assert
        assert_eq!(result, ConfirmationDispatch::Disabled);
    }

    #[tokio::test]
    async fn send_primary() {
        // Arrange
        let time = MockTimeService::new().with_now(*NOW);
        let tracking_id = MockTrackingIdService::new().with_generate(TRACKING_ID_1.clone());
        let email =
            MockEmailService::new().with_send(TEMPLATE.into(), primary_params(&ANA), Ok(receipt()));

        let sut = ContactDispatchServiceImpl {
            time,
            tracking_id,
            email,
            config: config(true),
        };

        // Act
        let result = sut.send_primary(&ANA).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            PrimaryDispatch {
                message_id: "OK".into(),
                tracking_id: TRACKING_ID_1.clone(),
            }
        );
    }
}
