use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use microcuenca_config::Config;
use microcuenca_core_contact_contracts::dispatch::ContactDispatchService;
use microcuenca_core_contact_impl::dispatch::ProjectInfo;
use microcuenca_models::contact::ContactSubmission;
use serde_json::json;
use tracing::info;

use crate::environment::{ConfigProvider, Provider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test notification through EmailJS
    Test {
        /// Inbox receiving the test notification instead of the project email
        recipient: String,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: String) -> anyhow::Result<()> {
    let mut config_provider = ConfigProvider::new(&config)?;
    let project = &config_provider.contact_dispatch_config.project;
    config_provider.contact_dispatch_config.project = Arc::new(ProjectInfo {
        email: recipient.clone(),
        ..ProjectInfo::clone(project)
    });

    let submission = ContactSubmission::validate(&json!({
        "nombre": "Prueba de Entregabilidad",
        "email": recipient,
        "tipoInteres": "informacion",
        "mensaje": "El servicio de email parece estar funcionando.",
        "enviarConfirmacion": false,
    }))
    .map_err(|err| anyhow::anyhow!("{err}: {:?}", err.errors))?;

    let dispatch = Provider::new(config_provider)
        .contact_dispatch()
        .send_primary(&submission)
        .await
        .context("Failed to send test email")?;

    info!(
        tracking_id = %dispatch.tracking_id,
        message_id = %dispatch.message_id,
        "Test email sent to {recipient}"
    );

    Ok(())
}
