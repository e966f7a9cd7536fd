use std::sync::Arc;

use microcuenca_core_config_contracts::{ConfigFeatureService, PublicConfig, PublicProject};
use microcuenca_models::{
    catalog::{InterestType, Program},
    contact::{ContactMessage, PhoneNumber, PHONE_NUMBER_REGEX},
};

#[derive(Debug, Clone)]
pub struct ConfigFeatureServiceImpl {
    config: ConfigFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ConfigFeatureConfig {
    pub project: Arc<PublicProject>,
    /// Whether confirmation emails are sent to people who ask for them.
    pub enable_confirmation: bool,
}

impl ConfigFeatureServiceImpl {
    pub fn new(config: ConfigFeatureConfig) -> Self {
        Self { config }
    }
}

impl ConfigFeatureService for ConfigFeatureServiceImpl {
    fn get_public_config(&self) -> PublicConfig {
        PublicConfig {
            project: PublicProject::clone(&self.config.project),
            programs: Program::ALL,
            interest_types: InterestType::OFFERED,
            max_message_length: ContactMessage::MAX_LENGTH,
            enable_confirmation: self.config.enable_confirmation,
            phone_pattern: PHONE_NUMBER_REGEX.as_str(),
            phone_example: PhoneNumber::EXAMPLE,
        }
    }
}
