//! Clean up raw model completions into a single-line query.

/// Normalize a raw completion.
///
/// In order: trim, drop backticks, turn double quotes into single quotes, collapse
/// whitespace runs (newlines included) into single spaces, and strip a leading `sql`
/// token left over from code fences, together with a `:` that follows it. Applying it
/// twice gives the same result.
pub fn normalize_completion(raw: &str) -> String {
    let cleaned = raw.trim().replace('`', "").replace('"', "'");
    let mut query = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    while let Some(rest) = strip_sql_token(&query) {
        query = rest.to_string();
    }

    query
}

/// `Some(remainder)` when the text starts with a standalone, case-insensitive `sql`.
fn strip_sql_token(query: &str) -> Option<&str> {
    let prefix = query.get(..3)?;
    if !prefix.eq_ignore_ascii_case("sql") {
        return None;
    }

    let rest = &query[3..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_code_fence_residue() {
        let raw = "```sql\nSELECT *\nFROM data\nWHERE city = \"Mumbai\";\n```";
        assert_eq!(
            normalize_completion(raw),
            "SELECT * FROM data WHERE city = 'Mumbai';"
        );
    }

    #[test]
    fn strips_uppercase_prefix() {
        assert_eq!(
            normalize_completion("  SQL   SELECT  COUNT(*)  FROM data "),
            "SELECT COUNT(*) FROM data"
        );
    }

    #[test]
    fn strips_prefix_followed_by_colon() {
        assert_eq!(
            normalize_completion("SQL: SELECT * FROM data"),
            "SELECT * FROM data"
        );
    }

    #[test]
    fn keeps_identifiers_that_merely_start_with_sql() {
        assert_eq!(normalize_completion("sql_total"), "sql_total");
        assert_eq!(normalize_completion("sqlite"), "sqlite");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "```sql\nSELECT `city`\nFROM data WHERE city = \"Pune\"\n```",
            "sql sql SELECT 1",
            "SQL:\n\tSELECT AVG(amount) FROM data",
            "",
            "   ",
            "sql",
        ];
        for input in inputs {
            let once = normalize_completion(input);
            assert_eq!(normalize_completion(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn output_is_a_single_line_without_backticks_or_double_quotes() {
        let normalized = normalize_completion("SQL\nSELECT `a`,\n\"b\"\n\nFROM data");
        assert!(!normalized.contains('\n'));
        assert!(!normalized.contains('`'));
        assert!(!normalized.contains('"'));
        assert_eq!(normalized, "SELECT a, 'b' FROM data");
    }
}
