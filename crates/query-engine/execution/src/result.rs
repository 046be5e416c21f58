//! Rows produced by execution or by the fallback filter.

use query_engine_metadata::metadata::Record;

/// How far a result set can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exactness {
    /// Produced by evaluating the query.
    Exact,
    /// Produced by the substring heuristic after evaluation failed.
    Approximate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub rows: Vec<Record>,
    pub exactness: Exactness,
}

impl ResultSet {
    pub fn exact(rows: Vec<Record>) -> Self {
        ResultSet {
            rows,
            exactness: Exactness::Exact,
        }
    }

    pub fn approximate(rows: Vec<Record>) -> Self {
        ResultSet {
            rows,
            exactness: Exactness::Approximate,
        }
    }

    pub fn is_approximate(&self) -> bool {
        self.exactness == Exactness::Approximate
    }
}
