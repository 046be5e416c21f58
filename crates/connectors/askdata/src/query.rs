//! Answer a question about the current dataset.
//!
//! A question goes through translation (cache or model), validation and execution. When
//! execution fails the fallback filter produces an approximate answer instead, so
//! execution errors never reach the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info_span, Instrument};

use query_engine_execution::fallback::fallback_filter;
use query_engine_execution::query::execute;
use query_engine_execution::result::ResultSet;
use query_engine_metadata::metadata::Record;
use query_engine_translation::translation;
use query_engine_translation::translation::query::{translate, Origin};
use query_engine_translation::translation::safety::{validate, UnsafeQueryError};

use crate::state::State;

pub const APPROXIMATE_NOTE: &str = "Used simplified filtering as SQL execution failed";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranscriptionRequest {
    #[serde(default)]
    pub transcription: String,
}

/// What went wrong, for callers that branch on the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidRequest,
    NoDataset,
    Translation,
    UnsafeQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Success(QuerySuccess),
    Failure(QueryFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySuccess {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub sql_query: String,
    pub data: Vec<Record>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub approximate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFailure {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub error: String,
    pub error_kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
}

impl QueryResponse {
    fn answered(answer: Answer, transcription: Option<String>) -> Self {
        let approximate = answer.result.is_approximate();
        QueryResponse::Success(QuerySuccess {
            success: true,
            transcription,
            sql_query: answer.sql,
            data: answer.result.rows,
            approximate,
            note: approximate.then(|| APPROXIMATE_NOTE.to_string()),
        })
    }

    fn failed(err: &QueryError, transcription: Option<String>) -> Self {
        QueryResponse::Failure(QueryFailure {
            success: false,
            transcription,
            error: err.to_string(),
            error_kind: err.kind(),
            sql_query: err.sql_query().map(str::to_string),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryResponse::Success(_))
    }
}

/// Reasons the pipeline stops without an answer.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No transcription provided")]
    NoTranscription,
    #[error("No data loaded. Please upload a file first.")]
    NoDataset,
    #[error("{0}")]
    Translation(#[from] translation::error::Error),
    #[error("{source}")]
    UnsafeQuery {
        sql: String,
        #[source]
        source: UnsafeQueryError,
    },
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::NoTranscription => ErrorKind::InvalidRequest,
            QueryError::NoDataset => ErrorKind::NoDataset,
            QueryError::Translation(_) => ErrorKind::Translation,
            QueryError::UnsafeQuery { .. } => ErrorKind::UnsafeQuery,
        }
    }

    /// The candidate query, when one was produced before the failure.
    pub fn sql_query(&self) -> Option<&str> {
        match self {
            QueryError::UnsafeQuery { sql, .. } => Some(sql),
            _ => None,
        }
    }
}

struct Answer {
    sql: String,
    result: ResultSet,
}

/// Answer a typed question.
pub async fn query(state: &State, request: QueryRequest) -> QueryResponse {
    tracing::info!(question = %request.query, "Received user query");
    match answer(state, &request.query)
        .instrument(info_span!("Answer question"))
        .await
    {
        Ok(answer) => QueryResponse::answered(answer, None),
        Err(err) => {
            log_failure("Query error", &err);
            QueryResponse::failed(&err, None)
        }
    }
}

/// Answer a question transcribed from speech. The transcription is echoed back.
pub async fn transcription_query(state: &State, request: TranscriptionRequest) -> QueryResponse {
    let transcription = request.transcription;
    let result = if transcription.trim().is_empty() {
        Err(QueryError::NoTranscription)
    } else {
        tracing::info!(transcription = %transcription, "Received transcribed query");
        answer(state, &transcription)
            .instrument(info_span!("Answer transcribed question"))
            .await
    };

    match result {
        Ok(answer) => QueryResponse::answered(answer, Some(transcription)),
        Err(err) => {
            log_failure("Transcription query error", &err);
            QueryResponse::failed(&err, Some(transcription))
        }
    }
}

fn log_failure(name: &str, err: &QueryError) {
    if let QueryError::UnsafeQuery { sql, .. } = err {
        tracing::warn!(sql = %sql, "Rejected unsafe query: {}", err);
    } else {
        tracing::error!(
            meta.signal_type = "log",
            event.domain = "askdata",
            event.name = name,
            name = name,
            body = %err,
            error = true,
        );
    }
}

async fn answer(state: &State, question: &str) -> Result<Answer, QueryError> {
    let context = match state.store.current() {
        Some(context) if !context.dataset.is_empty() => context,
        _ => return Err(QueryError::NoDataset),
    };
    let schema = Some(context.dataset.schema()).filter(|schema| !schema.is_empty());

    let candidate = translate(state.model.as_ref(), &context.cache, question, schema)
        .instrument(info_span!("Translate question"))
        .await?;
    if candidate.origin == Origin::Cache {
        state.metrics.cache_hit_total.inc();
    }

    let validation =
        info_span!("Validate query").in_scope(|| validate(&candidate.sql).map(|_| ()));
    if let Err(source) = validation {
        state.metrics.unsafe_query_total.inc();
        return Err(QueryError::UnsafeQuery {
            sql: candidate.sql,
            source,
        });
    }

    let result = match execute(Some(&context.dataset), &candidate.sql)
        .instrument(info_span!("Execute query"))
        .await
    {
        Ok(result) => result,
        Err(err) if err.is_execution_failure() => {
            tracing::warn!(
                "SQL execution failed, falling back to simplified filtering: {}",
                err
            );
            state.metrics.fallback_total.inc();
            let result = info_span!("Fallback filter")
                .in_scope(|| fallback_filter(&candidate.sql, &context.dataset));
            if result.rows.is_empty() {
                tracing::warn!("Query returned no results");
            }
            result
        }
        Err(_) => return Err(QueryError::NoDataset),
    };

    state.metrics.query_total.inc();
    Ok(Answer {
        sql: candidate.sql,
        result,
    })
}
