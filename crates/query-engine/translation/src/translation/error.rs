//! Errors for query translation.

use thiserror::Error;

use super::model::ModelError;

/// A type for translation errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error generating SQL query: {0}")]
    Model(#[from] ModelError),
}
