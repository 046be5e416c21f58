//! Helpers shared by the integration tests of the workspace crates.

pub mod deployment;
pub mod fixtures;
pub mod model;
