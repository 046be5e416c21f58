//! Prompts sent to the model.

use query_engine_metadata::metadata::{Schema, TABLE_NAME};

const SCHEMA_AWARE_EXAMPLES: &str = "\
Here are some examples of questions and corresponding SQL queries:
- Question: Show all records.
  SQL: SELECT * FROM data;
- Question: What is the average value of column 'amount'?
  SQL: SELECT AVG(amount) FROM data;
- Question: Show records where 'city' is 'Mumbai'.
  SQL: SELECT * FROM data WHERE city = 'Mumbai';";

const GENERIC_EXAMPLES: &str = "\
Here are some examples of questions and corresponding SQL queries:
- Question: Show all records.
  SQL: SELECT * FROM data;
- Question: How many records are there?
  SQL: SELECT COUNT(*) FROM data;";

/// Build the prompt for a question.
///
/// With a known, non-empty schema the prompt names the table and its columns and
/// asks the model to stick to them; otherwise a generic prompt is used.
pub fn build_prompt(question: &str, schema: Option<&Schema>) -> String {
    match schema.filter(|schema| !schema.is_empty()) {
        Some(schema) => format!(
            "You are an expert SQL query generator. Your job is to take a plain English question \
and return a single SQL query that answers that question. You will be provided \
with a description of the SQL database schema.

Here are the details of the table:
- Table Name: {TABLE_NAME}
- Columns: {columns}

{SCHEMA_AWARE_EXAMPLES}

Now, generate the SQL query for the following question:
Question: {question}

Important notes:
- Only return a single SQL query.
- Always start the SQL query with SELECT.
- Use only the column names provided.
- Do not include any explanations or descriptive text.
- Enclose string values in single quotes.
",
            columns = schema.columns().join(", "),
        ),
        None => format!(
            "You are an expert SQL query generator. Your job is to take a plain English question \
and return a single SQL query that answers that question.

{GENERIC_EXAMPLES}

Now, generate the SQL query for the following question:
Question: {question}

Important notes:
- Only return a single SQL query.
- Always start the SQL query with SELECT.
- Do not include any explanations or descriptive text.
- Enclose string values in single quotes.
"
        ),
    }
}
