pub mod configuration;
pub mod environment;
pub mod error;
pub mod model_settings;
pub mod values;
pub mod version1;

pub use configuration::{make_runtime_configuration, Configuration};
pub use model_settings::ModelSettings;
pub use values::{Secret, UploadSettings};
pub use version1::{
    parse_configuration, write_parsed_configuration, ParsedConfiguration,
    CONFIGURATION_FILENAME, DEFAULT_API_KEY_VARIABLE,
};
