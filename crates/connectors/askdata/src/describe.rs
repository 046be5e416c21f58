//! Describe the current dataset: a one-line summary and follow-up question ideas.

use serde::Deserialize;

use query_engine_metadata::metadata::Dataset;
use query_engine_translation::translation::suggestions;

use crate::state::State;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub input: String,
}

/// Four questions built around `input`, using the current schema when there is one.
pub fn suggest(state: &State, request: &SuggestRequest) -> Vec<String> {
    let context = state.store.current();
    let schema = context
        .as_ref()
        .map(|context| context.dataset.schema())
        .filter(|schema| !schema.is_empty());
    suggestions::suggest(&request.input, schema).to_vec()
}

pub fn summary(state: &State) -> String {
    match state.store.current() {
        Some(context) => context.dataset.summary(),
        None => Dataset::empty().summary(),
    }
}
