use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use microcuenca_api_rest::{RateLimitConfig, RealIpConfig, RestServerConfig};
use microcuenca_config::Config;
use microcuenca_core_config_contracts::PublicProject;
use microcuenca_core_config_impl::ConfigFeatureConfig;
use microcuenca_core_contact_impl::dispatch::{ContactDispatchConfig, ProjectInfo};
use microcuenca_core_health_impl::HealthFeatureConfig;
use microcuenca_email_impl::EmailServiceConfig;
use types::{
    ConfigFeature, ContactDispatch, ContactFeature, Email, HealthFeature, Process, RestServer,
    Time, TrackingId,
};

pub mod types;

/// Builds every service of the application from a shared set of instances.
#[derive(Debug)]
pub struct Provider {
    time: Time,
    process: Process,
    email: Email,
    config: ConfigProvider,
}

impl Provider {
    pub fn new(config: ConfigProvider) -> Self {
        Self {
            time: Time::default(),
            process: Process::new(),
            email: Email::new(config.email_service_config.clone()),
            config,
        }
    }

    pub fn email(&self) -> Email {
        self.email.clone()
    }

    pub fn contact_dispatch(&self) -> ContactDispatch {
        ContactDispatch::new(
            self.time,
            TrackingId::new(self.time),
            self.email(),
            self.config.contact_dispatch_config.clone(),
        )
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(
            self.time,
            self.process,
            self.email(),
            self.config.health_feature_config.clone(),
        )
    }

    pub fn config_feature(&self) -> ConfigFeature {
        ConfigFeature::new(self.config.config_feature_config.clone())
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(self.contact_dispatch(), self.process, Utc::now())
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.config_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }
}

/// Reduced provider, capable of providing the configuration of every service
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    pub rest_server_config: RestServerConfig,

    // Email
    pub email_service_config: EmailServiceConfig,

    // Core
    pub contact_dispatch_config: ContactDispatchConfig,
    pub health_feature_config: HealthFeatureConfig,
    pub config_feature_config: ConfigFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        config.validate().context("Invalid config")?;

        let project_email = config.project.email.clone().unwrap_or_default();

        // API
        let rest_server_config = RestServerConfig {
            address: config.http.address,
            cors_origins: config.http.cors_origins.clone(),
            real_ip: config
                .http
                .real_ip
                .as_ref()
                .map(|real_ip_config| RealIpConfig {
                    header: real_ip_config.header.clone(),
                    set_from: real_ip_config.set_from,
                }),
            expose_error_details: config.http.expose_error_details && !config.is_production(),
            rate_limit: rate_limit_config(config.http.rate_limit),
            contact_rate_limit: rate_limit_config(config.contact.rate_limit),
        };

        // Email
        let email_service_config = EmailServiceConfig::new(
            config.email.endpoint_override.clone(),
            config.email.service_id.clone().unwrap_or_default(),
            config.email.public_key.clone(),
            config.email.private_key.clone(),
            config.email.timeout.0,
        );

        // Core
        let contact_dispatch_config = ContactDispatchConfig {
            template_id: config.email.template_id.as_deref().unwrap_or_default().into(),
            confirmation_template_id: config.email.confirmation_template().map(Into::into),
            project: ProjectInfo {
                name: config.project.name.clone(),
                email: project_email.clone(),
                sender_name: config.project.sender_name.clone(),
                university: config.project.university.clone(),
                utc_offset: config.project.utc_offset,
            }
            .into(),
        };

        let health_feature_config = HealthFeatureConfig {
            environment: config.environment.as_str().into(),
        };

        let config_feature_config = ConfigFeatureConfig {
            project: Arc::new(PublicProject {
                name: config.project.name.clone(),
                email: project_email,
                university: config.project.university.clone(),
            }),
            enable_confirmation: config.email.enable_confirmation,
        };

        Ok(Self {
            rest_server_config,
            email_service_config,
            contact_dispatch_config,
            health_feature_config,
            config_feature_config,
        })
    }
}

fn rate_limit_config(config: microcuenca_config::RateLimitConfig) -> RateLimitConfig {
    RateLimitConfig {
        window: config.window.0,
        max_requests: config.max_requests,
    }
}

#[cfg(test)]
mod tests {
    use microcuenca_config::ConfigError;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dev_config() {
        // Arrange
        let config = microcuenca_config::load_dev_config().unwrap();

        // Act
        let result = ConfigProvider::new(&config).unwrap();

        // Assert
        assert_eq!(result.rest_server_config.address, config.http.address);
        assert_eq!(
            result.rest_server_config.expose_error_details,
            config.http.expose_error_details
        );
        assert_eq!(
            result.rest_server_config.contact_rate_limit.max_requests,
            config.contact.rate_limit.max_requests
        );
        assert_eq!(
            result.contact_dispatch_config.confirmation_template_id.as_deref(),
            config.email.confirmation_template()
        );
        assert_eq!(
            result.contact_dispatch_config.project.email,
            config.project.email.unwrap()
        );
        assert_eq!(&*result.health_feature_config.environment, "development");
    }

    #[test]
    fn production_hides_error_details() {
        // Arrange
        let mut config = microcuenca_config::load_dev_config().unwrap();
        config.environment = microcuenca_config::PRODUCTION.into();
        config.http.expose_error_details = true;

        // Act
        let result = ConfigProvider::new(&config).unwrap();

        // Assert
        assert!(!result.rest_server_config.expose_error_details);
    }

    #[test]
    fn confirmation_disabled() {
        // Arrange
        let mut config = microcuenca_config::load_dev_config().unwrap();
        config.email.enable_confirmation = false;

        // Act
        let result = ConfigProvider::new(&config).unwrap();

        // Assert
        assert_eq!(result.contact_dispatch_config.confirmation_template_id, None);
        assert!(!result.config_feature_config.enable_confirmation);
    }

    #[test]
    fn missing_credentials() {
        // Arrange
        let mut config = microcuenca_config::load_dev_config().unwrap();
        config.email.private_key = None;

        // Act
        let result = ConfigProvider::new(&config);

        // Assert
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::Missing(vec!["email.private_key"]))
        );
    }

    #[test]
    fn rest_server() {
        let config = microcuenca_config::load_dev_config().unwrap();
        let provider = Provider::new(ConfigProvider::new(&config).unwrap());
        let _server: RestServer = provider.rest_server();
    }
}
