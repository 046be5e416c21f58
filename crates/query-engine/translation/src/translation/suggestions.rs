//! Example questions offered while the user types.

use query_engine_metadata::metadata::Schema;

/// Four example questions built around `seed`, using the first column when a schema
/// is known.
pub fn suggest(seed: &str, schema: Option<&Schema>) -> [String; 4] {
    match schema.and_then(|schema| schema.columns().first()) {
        Some(column) => [
            format!("Show all records where {column} contains {seed}"),
            format!("Count records grouped by {column}"),
            format!("Find maximum value of {column}"),
            format!("Show records sorted by {column}"),
        ],
        None => [
            format!("Show all customers from {seed}"),
            format!("Find transactions above {seed}"),
            format!("List loans with interest rate less than {seed}"),
            format!("Show credit scores higher than {seed}"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_first_column() {
        let schema = Schema(vec!["city".to_string(), "amount".to_string()]);
        assert_eq!(
            suggest("Mumbai", Some(&schema)),
            [
                "Show all records where city contains Mumbai",
                "Count records grouped by city",
                "Find maximum value of city",
                "Show records sorted by city",
            ]
        );
    }

    #[test]
    fn generic_without_schema() {
        let expected = [
            "Show all customers from 500",
            "Find transactions above 500",
            "List loans with interest rate less than 500",
            "Show credit scores higher than 500",
        ];
        assert_eq!(suggest("500", None), expected);
        assert_eq!(suggest("500", Some(&Schema::default())), expected);
    }
}
