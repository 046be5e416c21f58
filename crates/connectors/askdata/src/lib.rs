//! Answer natural-language questions about an uploaded table.
//!
//! The operations here are the service boundary: they take the shared [`state::State`],
//! run the translation and execution pipeline, and shape the results for callers.

pub mod describe;
pub mod gemini;
pub mod query;
pub mod state;
pub mod upload;
