use microcuenca_models::catalog::{InterestType, Program};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ConfigFeatureService: Send + Sync + 'static {
    /// Returns the configuration the contact form needs to render itself.
    fn get_public_config(&self) -> PublicConfig;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicConfig {
    pub project: PublicProject,
    pub programs: &'static [Program],
    pub interest_types: &'static [InterestType],
    pub max_message_length: usize,
    pub enable_confirmation: bool,
    pub phone_pattern: &'static str,
    pub phone_example: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicProject {
    pub name: String,
    pub email: String,
    pub university: String,
}

#[cfg(feature = "mock")]
impl MockConfigFeatureService {
    pub fn with_get_public_config(mut self, result: PublicConfig) -> Self {
        self.expect_get_public_config()
            .once()
            .return_once(move || result);
        self
    }
}
