use std::{
    net::{IpAddr, SocketAddr},
    path::Path,
};

use anyhow::Context;
use chrono::FixedOffset;
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use url::Url;

pub use crate::duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");
pub const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.dev.toml");

/// Prefix of environment variables overriding config values, e.g.
/// `MICROCUENCA__EMAIL__PUBLIC_KEY`.
pub const ENV_PREFIX: &str = "MICROCUENCA";
const ENV_SEPARATOR: &str = "__";

pub const PRODUCTION: &str = "production";

/// Loads the config files at `paths` (later files take precedence) and applies
/// environment overrides.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_environment(paths, Some(environment_source()))
}

/// Loads the default and development config files without environment
/// overrides.
pub fn load_dev_config() -> anyhow::Result<Config> {
    load_with_environment(
        &[Path::new(DEFAULT_CONFIG_PATH), Path::new(DEV_CONFIG_PATH)],
        None,
    )
}

fn load_with_environment(
    paths: &[impl AsRef<Path>],
    environment: Option<Environment>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    match environment {
        Some(environment) => builder.add_source(environment),
        None => builder,
    }
    .build()?
    .try_deserialize()
    .context("Failed to load config")
}

fn environment_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .list_separator(",")
        .with_list_parse_key("http.cors_origins")
        .try_parsing(true)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub environment: String,
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub email: EmailConfig,
    pub project: ProjectConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub cors_origins: Vec<String>,
    pub expose_error_details: bool,
    pub real_ip: Option<RealIpConfig>,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u64,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub confirmation_template_id: Option<String>,
    pub enable_confirmation: bool,
    pub timeout: Duration,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub email: Option<String>,
    pub sender_name: String,
    pub university: String,
    /// Offset of the local time used in email dates.
    #[serde(deserialize_with = "deserialize_utc_offset")]
    pub utc_offset: FixedOffset,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required config values: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION
    }

    /// Checks that every value required to send emails is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("email.public_key", &self.email.public_key),
            ("email.private_key", &self.email.private_key),
            ("email.service_id", &self.email.service_id),
            ("email.template_id", &self.email.template_id),
            ("project.email", &self.project.email),
        ];

        let missing = required
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(key, _)| key)
            .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}

impl EmailConfig {
    /// The confirmation template to use, unless confirmation emails are
    /// disabled.
    pub fn confirmation_template(&self) -> Option<&str> {
        self.confirmation_template_id
            .as_deref()
            .filter(|id| self.enable_confirmation && !id.is_empty())
    }
}

fn deserialize_utc_offset<'de, D>(deserializer: D) -> Result<FixedOffset, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}
