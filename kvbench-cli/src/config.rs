//! Configuration for the kvbench CLI.
//!
//! Configuration can be loaded from multiple sources with the following precedence (highest to
//! lowest):
//!
//! 1. Command line flags
//! 2. Environment variables (prefixed with `KVBENCH__`)
//! 3. YAML configuration file (specified via `-c` or `--config` flag)
//! 4. Defaults
//!
//! # Environment Variables
//!
//! Environment variables use `KVBENCH__` as a prefix and double underscores (`__`) to denote
//! nested configuration structures. For example:
//!
//! - `KVBENCH__GENERATE__DISTRIBUTION=zipf` selects the Zipfian key distribution
//! - `KVBENCH__RUN__CONCURRENCY=8` limits the runner to 8 concurrent commands
//!
//! # YAML Configuration File
//!
//! ```yaml
//! generate:
//!   distribution: zipf
//!   skew: 0.99
//!
//! run:
//!   concurrency: 8
//!   poll_interval: 50ms
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use figment::providers::{Env, Format, Serialized, Yaml};
use kvbench_runner::schedule::DEFAULT_POLL_INTERVAL;
use kvbench_workload::{DEFAULT_CLIENT, DEFAULT_SKEW, DistributionKind};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for all configuration options.
const ENV_PREFIX: &str = "KVBENCH__";

/// Runtime configuration for the Tokio async runtime used by `kvbench run`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Runtime {
    /// Number of worker threads driving the command tasks.
    ///
    /// Defaults to the number of CPU cores on the host machine.
    pub worker_threads: usize,
}

impl Default for Runtime {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
        }
    }
}

/// Parameters of `kvbench generate`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Generate {
    /// Number of distinct keys.
    pub key_count: usize,
    /// Proportion of read operations, between `0` and `1`.
    pub read_proportion: f64,
    /// Length of the values of write operations.
    pub value_length: usize,
    /// Popularity distribution of keys.
    pub distribution: DistributionKind,
    /// Skew of the Zipfian distribution.
    pub skew: f64,
    /// Number of operations written to the workload file.
    pub total_operations: usize,
    /// Client invocation at the start of every line.
    pub client: String,
    /// RNG seed. A random seed is used and logged if absent.
    pub seed: Option<u64>,
}

impl Default for Generate {
    fn default() -> Self {
        Self {
            key_count: 10,
            read_proportion: 0.5,
            value_length: 4,
            distribution: DistributionKind::Uniform,
            skew: DEFAULT_SKEW,
            total_operations: 1000,
            client: DEFAULT_CLIENT.to_owned(),
            seed: None,
        }
    }
}

/// Parameters of `kvbench run`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Run {
    /// Total number of commands to execute.
    pub ops: usize,
    /// Maximum number of commands in flight.
    pub concurrency: usize,
    /// How often the clock is checked while waiting for the start time.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Shell used to run each command as `<shell> -c <command>`.
    pub shell: String,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            ops: 1000,
            concurrency: 100,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shell: "bash".to_owned(),
        }
    }
}

/// Configuration of the kvbench CLI.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Runtime configuration.
    pub runtime: Runtime,
    /// Workload generation.
    pub generate: Generate,
    /// Command replay.
    pub run: Run,
}

impl Config {
    /// Loads the configuration from defaults, an optional YAML file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = figment::Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load(None).unwrap();

            assert_eq!(config.generate.key_count, 10);
            assert_eq!(config.generate.read_proportion, 0.5);
            assert_eq!(config.generate.distribution, DistributionKind::Uniform);
            assert_eq!(config.generate.skew, 1.2);
            assert_eq!(config.generate.seed, None);
            assert_eq!(config.run.ops, 1000);
            assert_eq!(config.run.concurrency, 100);
            assert_eq!(config.run.poll_interval, Duration::from_millis(200));
            assert_eq!(config.run.shell, "bash");

            Ok(())
        });
    }

    #[test]
    fn configurable_via_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KVBENCH__GENERATE__DISTRIBUTION", "zipf");
            jail.set_env("KVBENCH__GENERATE__SEED", "42");
            jail.set_env("KVBENCH__GENERATE__CLIENT", "./client");
            jail.set_env("KVBENCH__RUN__CONCURRENCY", "8");
            jail.set_env("KVBENCH__RUN__POLL_INTERVAL", "50ms");
            jail.set_env("KVBENCH__RUNTIME__WORKER_THREADS", "2");

            let config = Config::load(None).unwrap();

            assert_eq!(config.generate.distribution, DistributionKind::Zipf);
            assert_eq!(config.generate.seed, Some(42));
            assert_eq!(config.generate.client, "./client");
            assert_eq!(config.run.concurrency, 8);
            assert_eq!(config.run.poll_interval, Duration::from_millis(50));
            assert_eq!(config.runtime.worker_threads, 2);

            Ok(())
        });
    }

    #[test]
    fn configurable_via_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "kvbench.yaml",
                r#"
                generate:
                    key_count: 1000
                    distribution: zipf
                    skew: 0.99
                run:
                    ops: 50
                    shell: sh
                "#,
            )?;

            let config = Config::load(Some(Path::new("kvbench.yaml"))).unwrap();

            assert_eq!(config.generate.key_count, 1000);
            assert_eq!(config.generate.distribution, DistributionKind::Zipf);
            assert_eq!(config.generate.skew, 0.99);
            assert_eq!(config.run.ops, 50);
            assert_eq!(config.run.shell, "sh");
            // untouched values keep their defaults
            assert_eq!(config.generate.value_length, 4);

            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("kvbench.yaml", "run:\n  concurrency: 4\n")?;
            jail.set_env("KVBENCH__RUN__CONCURRENCY", "16");

            let config = Config::load(Some(Path::new("kvbench.yaml"))).unwrap();
            assert_eq!(config.run.concurrency, 16);

            Ok(())
        });
    }

    #[test]
    fn rejects_unknown_distribution() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KVBENCH__GENERATE__DISTRIBUTION", "pareto");
            assert!(Config::load(None).is_err());
            Ok(())
        });
    }
}
