use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Limits applied to uploaded dataset files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSettings {
    /// Largest accepted upload, in bytes.
    #[serde(default = "max_content_length_default")]
    pub max_content_length: u64,
    /// Accepted file extensions, compared case-insensitively.
    #[serde(default = "allowed_extensions_default")]
    pub allowed_extensions: Vec<String>,
    /// How many records an upload summary shows.
    #[serde(default = "sample_size_default")]
    pub sample_size: usize,
}

impl UploadSettings {
    pub fn is_default(&self) -> bool {
        *self == UploadSettings::default()
    }

    /// The lower-cased extension of `filename` if it is one we accept.
    pub fn allowed_extension(&self, filename: &str) -> Option<String> {
        let (_, extension) = filename.rsplit_once('.')?;
        let extension = extension.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
            .then_some(extension)
    }
}

impl Default for UploadSettings {
    fn default() -> UploadSettings {
        UploadSettings {
            max_content_length: 16 * 1024 * 1024,
            allowed_extensions: vec!["csv".to_string(), "json".to_string()],
            sample_size: 5,
        }
    }
}

// for serde default //
fn max_content_length_default() -> u64 {
    UploadSettings::default().max_content_length
}
fn allowed_extensions_default() -> Vec<String> {
    UploadSettings::default().allowed_extensions
}
fn sample_size_default() -> usize {
    UploadSettings::default().sample_size
}
