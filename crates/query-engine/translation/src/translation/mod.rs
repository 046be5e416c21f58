//! Translate a free-text question into a candidate SQL query, and guard what comes out.

pub mod error;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod query;
pub mod safety;
pub mod suggestions;
