//! Turn a question into a candidate query.

use tracing::{info_span, Instrument};

use query_engine_metadata::metadata::{QueryCache, Schema};

use super::error::Error;
use super::model::LanguageModel;
use super::normalize::normalize_completion;
use super::prompt::build_prompt;

/// Where a candidate query came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Model,
}

/// Query text that has not been validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub sql: String,
    pub origin: Origin,
}

/// Translate a question into a candidate query.
///
/// An exact hit in the cache wins and the model is never called. Otherwise the model
/// is asked once and its completion normalized.
pub async fn translate(
    model: &dyn LanguageModel,
    cache: &QueryCache,
    question: &str,
    schema: Option<&Schema>,
) -> Result<CandidateQuery, Error> {
    if let Some(sql) = cache.get(question) {
        tracing::info!(question = %question, sql = %sql, "Retrieved SQL query from loaded data");
        return Ok(CandidateQuery {
            sql: sql.to_string(),
            origin: Origin::Cache,
        });
    }

    let prompt = build_prompt(question, schema);
    let completion = model
        .complete(&prompt)
        .instrument(info_span!("Invoke model"))
        .await
        .map_err(|err| {
            tracing::error!("Error generating SQL: {}", err);
            Error::from(err)
        })?;

    let sql = normalize_completion(&completion);
    tracing::info!(sql = %sql, "Generated SQL query");

    Ok(CandidateQuery {
        sql,
        origin: Origin::Model,
    })
}
