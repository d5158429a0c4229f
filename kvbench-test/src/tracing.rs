use tracing_subscriber::EnvFilter;

/// Crates whose logs are captured in tests.
const CRATE_NAMES: &[&str] = &["kvbench_cli", "kvbench_runner", "kvbench_workload"];

/// Initialize the logger for testing.
///
/// Logs of the kvbench crates are written at `DEBUG` level to the output captured by the Rust test
/// runner, everything else only at `ERROR`. Calling this more than once is a no-op.
///
/// # Example
///
/// ```
/// kvbench_test::tracing::init();
/// ```
pub fn init() {
    let env_filter = CRATE_NAMES
        .iter()
        .filter_map(|name| format!("{name}=DEBUG").parse().ok())
        .fold(EnvFilter::new("ERROR"), EnvFilter::add_directive);

    tracing_subscriber::fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_test_writer()
        .compact()
        .try_init()
        .ok();
}
