//! Deployment functions used across test cases.

use std::path::PathBuf;

/// Find the project root via the crate root provided by `cargo test`,
/// and get a path relative to it.
/// This depends on the convention that this crate lives in `/crates/tests/tests-common`
/// and will break in the unlikely case that we change this
pub fn get_path_from_project_root(path: impl AsRef<std::path::Path>) -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("../../../");
    d.push(path);
    d
}

/// Install `env_logger` so `RUST_LOG` controls test output. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
