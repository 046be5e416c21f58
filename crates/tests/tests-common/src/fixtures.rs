//! Datasets used by more than one test suite.

use query_engine_metadata::metadata::Dataset;
use serde_json::json;

/// Path, relative to the project root, of the sample customer dataset.
pub const CUSTOMERS_DATASET_PATH: &str = "static/customers.json";

/// Two sales records, one of them in Mumbai.
pub fn sales_records() -> Vec<serde_json::Value> {
    vec![
        json!({"city": "Mumbai", "amount": 10}),
        json!({"city": "Pune", "amount": 20}),
    ]
}

pub fn sales() -> Dataset {
    match Dataset::from_json_records(sales_records()) {
        Ok(dataset) => dataset,
        Err(err) => panic!("sales fixture is malformed: {err}"),
    }
}

/// The sales records as an uploaded JSON file, bare array form.
pub fn sales_json() -> Vec<u8> {
    serde_json::Value::Array(sales_records()).to_string().into_bytes()
}

/// The sales records wrapped together with a precomputed query.
pub fn sales_json_with_cache(question: &str, sql: &str) -> Vec<u8> {
    let mut sql_queries = serde_json::Map::new();
    sql_queries.insert(question.to_string(), json!(sql));
    json!({
        "data": sales_records(),
        "sql_queries": sql_queries,
    })
    .to_string()
    .into_bytes()
}
