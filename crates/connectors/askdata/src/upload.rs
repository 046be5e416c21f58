//! Load an uploaded CSV or JSON file as the current dataset.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info_span;

use askdata_configuration::Configuration;
use query_engine_metadata::metadata::{Dataset, DatasetError, QueryCache, Record, Value};

use crate::state::State;

/// Summary of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub record_count: usize,
    pub columns: Vec<String>,
    pub sample: Vec<Record>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No selected file")]
    NoSelectedFile,
    #[error("File type not allowed")]
    FileTypeNotAllowed,
    #[error("File too large: {size} bytes exceeds the limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("Error processing file: no reader for .{0} files")]
    UnsupportedFormat(String),
    #[error("Error processing file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error processing file: expected a list of records or an object with a data field")]
    InvalidStructure,
    #[error("Error processing file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Error processing file: {0}")]
    Dataset(#[from] DatasetError),
}

/// Parse `contents` according to the extension of `filename` and make it the current
/// dataset, replacing any dataset and query cache loaded before.
pub fn upload(
    configuration: &Configuration,
    state: &State,
    filename: &str,
    contents: &Bytes,
) -> Result<UploadResponse, UploadError> {
    info_span!("Load dataset")
        .in_scope(|| load(configuration, state, filename, contents))
        .map_err(|err| {
            tracing::error!(
                meta.signal_type = "log",
                event.domain = "askdata",
                event.name = "Upload error",
                name = "Upload error",
                body = %err,
                error = true,
            );
            err
        })
}

fn load(
    configuration: &Configuration,
    state: &State,
    filename: &str,
    contents: &Bytes,
) -> Result<UploadResponse, UploadError> {
    let settings = &configuration.uploads;
    let filename = base_name(filename);
    if filename.is_empty() {
        return Err(UploadError::NoSelectedFile);
    }

    let extension = settings
        .allowed_extension(filename)
        .ok_or(UploadError::FileTypeNotAllowed)?;

    let size = contents.len() as u64;
    if size > settings.max_content_length {
        return Err(UploadError::TooLarge {
            size,
            limit: settings.max_content_length,
        });
    }

    let (dataset, cache) = match extension.as_str() {
        "csv" => (read_csv(contents)?, QueryCache::empty()),
        "json" => read_json(contents)?,
        other => return Err(UploadError::UnsupportedFormat(other.to_string())),
    };

    let context = state.store.load(dataset, cache);
    state.metrics.upload_total.inc();
    tracing::info!(
        records = context.dataset.len(),
        cached_queries = context.cache.len(),
        "Successfully loaded data from {filename}"
    );

    Ok(UploadResponse {
        message: format!("File {filename} uploaded and processed successfully"),
        record_count: context.dataset.len(),
        columns: context.dataset.schema().columns().to_vec(),
        sample: context.dataset.sample(settings.sample_size).to_vec(),
    })
}

/// The final path component, whichever separator the client used.
fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or_default().trim()
}

#[derive(Deserialize)]
struct WrappedDataset {
    #[serde(default)]
    data: Vec<serde_json::Value>,
    #[serde(default)]
    sql_queries: BTreeMap<String, String>,
}

fn read_json(contents: &[u8]) -> Result<(Dataset, QueryCache), UploadError> {
    match serde_json::from_slice(contents)? {
        serde_json::Value::Array(records) => {
            Ok((Dataset::from_json_records(records)?, QueryCache::empty()))
        }
        object @ serde_json::Value::Object(_) => {
            let wrapped: WrappedDataset =
                serde_json::from_value(object).map_err(|_| UploadError::InvalidStructure)?;
            Ok((
                Dataset::from_json_records(wrapped.data)?,
                QueryCache(wrapped.sql_queries),
            ))
        }
        _ => Err(UploadError::InvalidStructure),
    }
}

fn read_csv(contents: &[u8]) -> Result<Dataset, UploadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(contents);

    let header = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<String>>();

    let rows = reader
        .records()
        .map(|record| Ok(record?.iter().map(infer_cell).collect()))
        .collect::<Result<Vec<Vec<Value>>, csv::Error>>()?;

    Ok(Dataset::from_header_and_rows(header, rows)?)
}

/// Give a CSV cell the most specific type it reads as.
fn infer_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(integer) = cell.parse::<i64>() {
        return Value::from(integer);
    }
    let numeric = cell
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if numeric {
        if let Ok(float) = cell.parse::<f64>() {
            return Value::from_f64(float);
        }
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::from(cell)
}
