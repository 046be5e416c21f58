//! Approximate row selection for queries that could not be executed.
//!
//! This does not evaluate the WHERE clause. It only checks, for every column named
//! somewhere in the condition text, that the row's value also appears in it. The
//! result is always tagged approximate.

use query_engine_metadata::metadata::{Dataset, Record};

use crate::result::ResultSet;

/// Select the records that plausibly match the query's WHERE clause. Never fails.
pub fn fallback_filter(query: &str, dataset: &Dataset) -> ResultSet {
    let lowered = query.to_lowercase();

    let rows = match lowered.find("where") {
        None => dataset.records().to_vec(),
        Some(position) => {
            let condition = &lowered[position + "where".len()..];
            dataset
                .records()
                .iter()
                .filter(|record| matches_condition(record, condition))
                .cloned()
                .collect()
        }
    };

    ResultSet::approximate(rows)
}

fn matches_condition(record: &Record, condition: &str) -> bool {
    record.iter().all(|(column, value)| {
        !condition.contains(&column.to_lowercase())
            || condition.contains(&value.lowercase_text())
    })
}
