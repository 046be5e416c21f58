//! Language model connection settings.

use crate::values::{ApiKey, ModelEndpoint, ModelName, Secret};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY_VARIABLE: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL_NAME: &str = "models/gemini-1.5-pro-latest";
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Language model connection settings.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    /// Fully qualified name of the generative model.
    #[serde(default = "name_default")]
    pub name: ModelName,
    /// Base URL of the generative language API.
    #[serde(default = "endpoint_default")]
    pub endpoint: ModelEndpoint,
    /// API key sent with every completion request.
    pub api_key: ApiKey,
}

impl ModelSettings {
    pub fn empty() -> Self {
        Self {
            name: name_default(),
            endpoint: endpoint_default(),
            api_key: ApiKey(Secret::FromEnvironment {
                variable: DEFAULT_API_KEY_VARIABLE.into(),
            }),
        }
    }
}

fn name_default() -> ModelName {
    DEFAULT_MODEL_NAME.into()
}

fn endpoint_default() -> ModelEndpoint {
    DEFAULT_MODEL_ENDPOINT.into()
}
