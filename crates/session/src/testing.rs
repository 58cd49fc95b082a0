use tracing_subscriber::EnvFilter;

/// Installs a test-friendly `tracing` subscriber.
///
/// Honors `RUST_LOG`, writes through the test harness capture, and is a no-op
/// when a global subscriber already exists.
pub fn init_test_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
