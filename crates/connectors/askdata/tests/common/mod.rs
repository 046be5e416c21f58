//! Common functions used across test cases.

use std::sync::Arc;

use askdata::state::{self, State};
use askdata_configuration::environment::FixedEnvironment;
use askdata_configuration::values::ApiKey;
use askdata_configuration::{make_runtime_configuration, Configuration, ParsedConfiguration};
use bytes::Bytes;
use query_engine_translation::translation::model::LanguageModel;

/// A runtime configuration with default upload limits and an inline API key.
pub fn configuration() -> Configuration {
    let mut parsed = ParsedConfiguration::initial();
    parsed.model.api_key = ApiKey::from("test-key");
    make_runtime_configuration(parsed, FixedEnvironment::default()).unwrap()
}

/// Creates a fresh state around the given model, with its own metrics registry.
pub async fn create_state(model: Arc<dyn LanguageModel>) -> State {
    tests_common::deployment::init_logging();
    let mut registry = prometheus::Registry::new();
    state::create_state_with_model(model, &mut registry)
        .await
        .unwrap()
}

/// Creates a state with `contents` already uploaded under `filename`.
pub async fn create_state_with_upload(
    model: Arc<dyn LanguageModel>,
    filename: &str,
    contents: Vec<u8>,
) -> State {
    let state = create_state(model).await;
    askdata::upload::upload(&configuration(), &state, filename, &Bytes::from(contents)).unwrap();
    state
}
