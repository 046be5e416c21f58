//! Precomputed queries shipped alongside a dataset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from an exact question to a known-good query.
///
/// Lookups are verbatim: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryCache(pub BTreeMap<String, String>);

impl QueryCache {
    pub fn empty() -> Self {
        QueryCache::default()
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryCache {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryCache(
            iter.into_iter()
                .map(|(question, query)| (question.into(), query.into()))
                .collect(),
        )
    }
}
