use microcuenca_core_config_contracts::{PublicConfig, PublicProject};
use microcuenca_models::catalog::{InterestType, Program};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiPublicConfig {
    pub project: ApiPublicProject,
    pub options: ApiOptions,
    pub settings: ApiSettings,
    pub validation: ApiValidation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiPublicProject {
    pub name: String,
    pub email: String,
    pub university: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiOptions {
    #[serde(rename = "carreras")]
    pub programs: Vec<ApiProgram>,
    #[serde(rename = "tiposInteres")]
    pub interest_types: Vec<ApiInterestType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiProgram {
    pub value: Program,
    pub label: &'static str,
    #[serde(rename = "categoria")]
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiInterestType {
    pub value: InterestType,
    pub label: &'static str,
    #[serde(rename = "descripcion")]
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSettings {
    pub max_message_length: usize,
    pub enable_confirmation: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiValidation {
    pub phone_pattern: &'static str,
    pub phone_example: &'static str,
}

impl From<PublicConfig> for ApiPublicConfig {
    fn from(value: PublicConfig) -> Self {
        Self {
            project: value.project.into(),
            options: ApiOptions {
                programs: value.programs.iter().copied().map(Into::into).collect(),
                interest_types: value
                    .interest_types
                    .iter()
                    .copied()
                    .map(Into::into)
                    .collect(),
            },
            settings: ApiSettings {
                max_message_length: value.max_message_length,
                enable_confirmation: value.enable_confirmation,
            },
            validation: ApiValidation {
                phone_pattern: value.phone_pattern,
                phone_example: value.phone_example,
            },
        }
    }
}

impl From<PublicProject> for ApiPublicProject {
    fn from(value: PublicProject) -> Self {
        Self {
            name: value.name,
            email: value.email,
            university: value.university,
        }
    }
}

impl From<Program> for ApiProgram {
    fn from(value: Program) -> Self {
        Self {
            value,
            label: value.label(),
            category: value.category().label(),
        }
    }
}

impl From<InterestType> for ApiInterestType {
    fn from(value: InterestType) -> Self {
        Self {
            value,
            label: value.label(),
            description: value.description(),
        }
    }
}
