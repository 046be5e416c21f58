//! Execute a validated query against the loaded dataset.

use futures_util::StreamExt;
use indexmap::IndexMap;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Either, Row, TypeInfo, ValueRef};
use tracing::{info_span, Instrument};

use query_engine_metadata::metadata::{Dataset, Record, Value, TABLE_NAME};

use crate::error::Error;
use crate::result::ResultSet;

/// Execute a query against the dataset, exposed as the single table `data`.
///
/// The dataset is materialized into a fresh in-memory SQLite database for every call,
/// so no state survives between executions. The connection is read-only once the
/// dataset is in, and `sql` must be a single statement. Failures are reported once and
/// never retried here; whether to fall back is up to the caller.
pub async fn execute(dataset: Option<&Dataset>, sql: &str) -> Result<ResultSet, Error> {
    let dataset = match dataset {
        Some(dataset) if !dataset.is_empty() => dataset,
        _ => return Err(Error::NoDataset),
    };

    let mut connection = materialize(dataset)
        .instrument(info_span!("Materialize dataset"))
        .await
        .map_err(Error::DB)?;

    sqlx::query("PRAGMA query_only = ON")
        .execute(&mut connection)
        .await
        .map_err(Error::DB)?;

    let rows = run_single_statement(&mut connection, sql)
        .instrument(info_span!("Run query"))
        .await?;

    let records = rows
        .iter()
        .map(row_to_record)
        .collect::<Result<Vec<Record>, sqlx::Error>>()
        .map_err(Error::Query)?;

    tracing::info!("Query returned {} results", records.len());

    Ok(ResultSet::exact(records))
}

/// Create the `data` table in a new in-memory database and copy every record into it.
async fn materialize(dataset: &Dataset) -> Result<SqliteConnection, sqlx::Error> {
    let mut connection = SqliteConnection::connect("sqlite::memory:").await?;

    let columns = dataset.schema().columns();
    let column_list = columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<String>>()
        .join(", ");

    let create = format!(
        "CREATE TABLE {} ({})",
        quote_identifier(TABLE_NAME),
        column_list
    );
    sqlx::query(&create).execute(&mut connection).await?;

    let insert = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(TABLE_NAME),
        column_list,
        vec!["?"; columns.len()].join(", ")
    );

    let mut transaction = connection.begin().await?;
    for record in dataset.records() {
        record
            .iter()
            .fold(sqlx::query(&insert), |query, (_, value)| {
                bind_value(query, value)
            })
            .execute(&mut *transaction)
            .await?;
    }
    transaction.commit().await?;

    Ok(connection)
}

/// Collect the rows of `sql`, refusing to go past the end of its first statement.
async fn run_single_statement(
    connection: &mut SqliteConnection,
    sql: &str,
) -> Result<Vec<SqliteRow>, Error> {
    let mut results = sqlx::query(sql).fetch_many(&mut *connection);
    let mut rows = vec![];
    let mut finished = false;
    while let Some(step) = results.next().await {
        if finished {
            return Err(Error::MultipleStatements);
        }
        match step.map_err(Error::Query)? {
            Either::Left(_) => finished = true,
            Either::Right(row) => rows.push(row),
        }
    }
    Ok(rows)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.clone()),
    }
}

/// Convert a result row into a record keyed by output column name.
fn row_to_record(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| {
            let value = decode_column(row, column.ordinal())?;
            Ok((column.name().to_string(), value))
        })
        .collect::<Result<IndexMap<String, Value>, sqlx::Error>>()
        .map(Record)
}

/// Decode a cell according to the storage class SQLite reports for it.
fn decode_column(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    match storage_class.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index).map(Value::from),
        "REAL" => row.try_get::<f64, _>(index).map(Value::from_f64),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|bytes| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
        _ => row.try_get::<String, _>(index).map(Value::String),
    }
}
