//! Shared helpers for backend integration tests.

pub mod pg_embed;

/// Returns true when `SKIP_TEST_CLUSTER` is set to `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a database setup failure.
///
/// Returns `None` after printing a skip marker when `SKIP_TEST_CLUSTER` is
/// truthy. Panics otherwise so CI never silently drops database coverage.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
