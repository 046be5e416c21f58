//! Errors for query execution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No data loaded. Please upload a file first.")]
    NoDataset,
    #[error("Error executing SQL query: {0}")]
    Query(#[source] sqlx::Error),
    #[error("Error executing SQL query: only a single statement can be run")]
    MultipleStatements,
    #[error("Unable to load the dataset into the query engine: {0}")]
    DB(#[source] sqlx::Error),
}

impl Error {
    /// Whether the query was attempted and failed, as opposed to there being nothing to
    /// run it against. Only these failures are worth an approximate answer.
    pub fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            Error::Query(_) | Error::MultipleStatements | Error::DB(_)
        )
    }
}
