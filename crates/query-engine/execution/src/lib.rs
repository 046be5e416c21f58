//! Query execution against the loaded dataset, and the approximate fallback used when
//! execution fails.

pub mod error;
pub mod fallback;
pub mod metrics;
pub mod query;
pub mod result;
