//! Shared helpers for integration tests

use std::path::PathBuf;

/// Unique file path in the system temp directory
///
/// Tag keeps colliding test names apart when the whole suite runs in one
/// process; the pid keeps parallel suite runs apart.
pub fn temp_matrix(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("odmx_test_{}_{}.odm", std::process::id(), tag))
}

/// Unique csv path in the system temp directory
pub fn temp_csv(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("odmx_test_{}_{}.csv", std::process::id(), tag))
}

/// Remove a test file, ignoring a missing one
pub fn cleanup(path: &std::path::Path) {
    let _ = std::fs::remove_file(path);
}
