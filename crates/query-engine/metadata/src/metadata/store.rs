//! The currently loaded dataset and its query cache.

use std::sync::{Arc, PoisonError, RwLock};

use super::cache::QueryCache;
use super::dataset::Dataset;

/// A dataset together with the queries precomputed for it.
/// Immutable once created; a new load produces a new context.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetContext {
    pub dataset: Dataset,
    pub cache: QueryCache,
}

/// Holds at most one current `DatasetContext`.
///
/// Loading replaces the context wholesale, last writer wins. Readers take a snapshot
/// with `current` and keep using it for the rest of their request.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Option<Arc<DatasetContext>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        DatasetStore::default()
    }

    /// Replace the current dataset and cache, returning the new context.
    pub fn load(&self, dataset: Dataset, cache: QueryCache) -> Arc<DatasetContext> {
        let context = Arc::new(DatasetContext { dataset, cache });
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(context.clone());
        context
    }

    pub fn current(&self) -> Option<Arc<DatasetContext>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
