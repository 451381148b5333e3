//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.
//!
//! A cluster that fails to start is a test failure unless the environment
//! opts out explicitly, so CI cannot pass without exercising the store.

const SKIP_TEST_CLUSTER_ENV: &str = "SKIP_TEST_CLUSTER";

/// True when `SKIP_TEST_CLUSTER` is `1`, `true`, or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var(SKIP_TEST_CLUSTER_ENV)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Print the skip marker and return `None` when skipping is enabled;
/// otherwise panic with the setup failure.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("test cluster setup failed: {reason}. Set {SKIP_TEST_CLUSTER_ENV}=1 to skip.");
    }
}
