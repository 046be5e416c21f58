//! Metadata information regarding the loaded dataset and its precomputed queries.

pub mod cache;
pub mod dataset;
pub mod store;
pub mod value;

// re-export without modules
pub use cache::*;
pub use dataset::*;
pub use store::*;
pub use value::*;

/// The name under which the dataset is exposed to queries.
pub const TABLE_NAME: &str = "data";
