//! Configuration for the service.

use std::path::Path;

use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ApiKey, ModelEndpoint, ModelName, UploadSettings};
use crate::version1::{ParsedConfiguration, CONFIGURATION_FILENAME};

/// The 'Configuration' type collects all the information necessary to serve requests at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which resolves every secret against the environment.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub model_name: ModelName,
    pub model_endpoint: ModelEndpoint,
    pub api_key: String,
    pub uploads: UploadSettings,
}

/// Resolve a parsed configuration into the runtime configuration.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let ApiKey(secret) = &parsed_config.model.api_key;
    let api_key = secret.resolve(&environment).map_err(|error| {
        MakeRuntimeConfigurationError::MissingEnvironmentVariable {
            file_path: Path::new(CONFIGURATION_FILENAME).to_path_buf(),
            message: error.to_string(),
        }
    })?;

    Ok(Configuration {
        model_name: parsed_config.model.name,
        model_endpoint: parsed_config.model.endpoint,
        api_key,
        uploads: parsed_config.uploads,
    })
}
