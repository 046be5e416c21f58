pub mod model_info;
mod secret;
mod upload_settings;

pub use model_info::{ApiKey, ModelEndpoint, ModelName};
pub use secret::Secret;
pub use upload_settings::UploadSettings;
