//! Language models with scripted behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use query_engine_translation::translation::model::{LanguageModel, ModelError};

/// Answers every prompt with the next scripted completion, repeating the last one
/// once the script runs out. Records every prompt it receives.
#[derive(Debug)]
pub struct ScriptedModel {
    completions: Vec<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new<I, S>(completions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedModel {
            completions: completions.into_iter().map(Into::into).collect(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn answering(completion: &str) -> Self {
        ScriptedModel::new([completion])
    }

    /// How many times the model was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.completions
            .get(call)
            .or(self.completions.last())
            .cloned()
            .ok_or(ModelError::EmptyCompletion)
    }
}

/// Fails every invocation with the given status code.
#[derive(Debug)]
pub struct FailingModel {
    status: u16,
    calls: AtomicUsize,
}

impl FailingModel {
    pub fn with_status(status: u16) -> Self {
        FailingModel {
            status,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for FailingModel {
    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ModelError::Status {
            status: self.status,
            body: "model unavailable".to_string(),
        })
    }
}
