use std::env;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the global tracing subscriber, logging to stderr.
pub fn init_tracing() {
    let (level, env_filter) = parse_rust_log();
    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(format.with_filter(LevelFilter::from(level)))
        .with(env_filter)
        .init();
}

/// Crates whose events pass the filter at every level.
const KVBENCH_CRATES: [&str; 4] = ["kvbench", "kvbench_cli", "kvbench_runner", "kvbench_workload"];

/// Reads `RUST_LOG` into the output level and the per-target filter.
pub fn parse_rust_log() -> (Level, EnvFilter) {
    log_filter(env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn log_filter(rust_log: Option<String>) -> (Level, EnvFilter) {
    let level = match rust_log {
        None => Level::INFO,
        Some(directives) => match directives.parse::<Level>() {
            Ok(level) => level,
            // anything other than a bare level is taken as a complete filter
            Err(_) => return (Level::TRACE, EnvFilter::new(directives)),
        },
    };

    // dependencies stay at INFO, kvbench crates are only capped by `level`
    let directives: Vec<_> = std::iter::once("INFO".to_owned())
        .chain(KVBENCH_CRATES.iter().map(|name| format!("{name}=TRACE")))
        .collect();

    (level, EnvFilter::new(directives.join(",")))
}
