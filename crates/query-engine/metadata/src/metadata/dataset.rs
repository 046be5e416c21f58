//! The tabular dataset questions are asked about.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use thiserror::Error;

use super::value::Value;

/// The ordered column names of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Schema(pub Vec<String>);

impl Schema {
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A single row, keyed by column name, in column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record(pub IndexMap<String, Value>);

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record(
            iter.into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}

/// Errors raised while building a dataset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("record {index} is not an object")]
    RecordNotAnObject { index: usize },
    #[error("row {row} has {found} values but the header has {expected} columns")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column '{0}' appears more than once (column names ignore case)")]
    DuplicateColumn(String),
}

/// Records plus the schema derived from them.
///
/// Every record holds exactly the schema's columns, in schema order; a column missing
/// from a source record is filled with an explicit null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Record>,
}

impl Dataset {
    pub fn empty() -> Self {
        Dataset::default()
    }

    /// Build a dataset from loosely shaped rows. The schema is the union of the row
    /// keys in order of first appearance.
    pub fn from_rows(rows: Vec<IndexMap<String, Value>>) -> Result<Self, DatasetError> {
        let columns: IndexSet<String> = rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect();
        check_distinct(&columns)?;

        let records = rows
            .into_iter()
            .map(|mut row| {
                Record(
                    columns
                        .iter()
                        .map(|column| {
                            let value = row.swap_remove(column).unwrap_or(Value::Null);
                            (column.clone(), value)
                        })
                        .collect(),
                )
            })
            .collect();

        Ok(Dataset {
            schema: Schema(columns.into_iter().collect()),
            records,
        })
    }

    /// Build a dataset from a sequence of JSON objects.
    pub fn from_json_records(records: Vec<serde_json::Value>) -> Result<Self, DatasetError> {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| match record {
                serde_json::Value::Object(fields) => Ok(fields
                    .into_iter()
                    .map(|(column, value)| (column, Value::from(value)))
                    .collect()),
                _ => Err(DatasetError::RecordNotAnObject { index }),
            })
            .collect::<Result<Vec<IndexMap<String, Value>>, DatasetError>>()?;

        Dataset::from_rows(rows)
    }

    /// Build a dataset from a header and positional rows, as read from a CSV file.
    pub fn from_header_and_rows(
        header: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, DatasetError> {
        check_distinct(&header)?;

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                if values.len() == header.len() {
                    Ok(Record(header.iter().cloned().zip(values).collect()))
                } else {
                    Err(DatasetError::RowLengthMismatch {
                        row,
                        expected: header.len(),
                        found: values.len(),
                    })
                }
            })
            .collect::<Result<Vec<Record>, DatasetError>>()?;

        Ok(Dataset {
            schema: Schema(header),
            records,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `size` records.
    pub fn sample(&self, size: usize) -> &[Record] {
        &self.records[..size.min(self.records.len())]
    }

    /// A one-line description of the dataset.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No data available.".to_string();
        }
        format!(
            "Found {} records with {} fields.",
            self.len(),
            self.schema.len()
        )
    }
}

/// Column names become SQLite identifiers, which compare ignoring ASCII case.
fn check_distinct<'a>(
    columns: impl IntoIterator<Item = &'a String>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.to_ascii_lowercase()) {
            return Err(DatasetError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}
