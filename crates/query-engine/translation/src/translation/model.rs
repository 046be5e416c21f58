//! The generative model used to turn prompts into SQL.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single model invocation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no completion text")]
    EmptyCompletion,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A text completion capability.
///
/// One call per translation, no retries: callers impose their own timeouts.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}
