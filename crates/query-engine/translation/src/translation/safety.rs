//! Reject anything that is not a single read-only SELECT.

use enum_iterator::Sequence;
use thiserror::Error;

/// Statement keywords that may never appear in a query, wherever they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum ForbiddenKeyword {
    Insert,
    Update,
    Delete,
    Drop,
    Truncate,
    Alter,
}

impl ForbiddenKeyword {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Drop => "drop",
            Self::Truncate => "truncate",
            Self::Alter => "alter",
        }
    }
}

impl std::fmt::Display for ForbiddenKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A candidate query that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnsafeQueryError {
    #[error("Only SELECT statements are allowed (found '{0}')")]
    ForbiddenKeyword(ForbiddenKeyword),
    #[error("Query must start with SELECT")]
    NotASelect,
}

/// Validate a candidate query, returning it unchanged when it is safe to run.
pub fn validate(candidate: &str) -> Result<&str, UnsafeQueryError> {
    let lowered = candidate.to_lowercase();

    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .collect();

    if let Some(keyword) = enum_iterator::all::<ForbiddenKeyword>()
        .find(|keyword| words.contains(&keyword.keyword()))
    {
        return Err(UnsafeQueryError::ForbiddenKeyword(keyword));
    }

    if !lowered.trim_start().starts_with("select") {
        return Err(UnsafeQueryError::NotASelect);
    }

    Ok(candidate)
}
