//! Transient state used by the service.
//!
//! This is initialized on startup.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info_span, Instrument};

use askdata_configuration::Configuration;
use query_engine_execution::metrics;
use query_engine_metadata::metadata::DatasetStore;
use query_engine_translation::translation::model::LanguageModel;

use crate::gemini::GeminiModel;

/// State for our service.
pub struct State {
    pub store: DatasetStore,
    pub metrics: metrics::Metrics,
    pub model: Arc<dyn LanguageModel>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("store", &self.store)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Create the model client and wrap it inside a State.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let model = GeminiModel::new(configuration).map_err(InitializationError::ModelClient)?;
    create_state_with_model(Arc::new(model), metrics_registry).await
}

/// Create a State around an already constructed model.
pub async fn create_state_with_model(
    model: Arc<dyn LanguageModel>,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let metrics = async {
        let metrics_inner = metrics::Metrics::initialize(metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        Ok(metrics_inner)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    Ok(State {
        store: DatasetStore::new(),
        metrics,
        model,
    })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to create the model client: {0}")]
    ModelClient(reqwest::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
