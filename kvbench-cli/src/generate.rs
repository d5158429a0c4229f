use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use kvbench_workload::{KeyDistribution, Workload, write_workload};

use crate::config::Generate;

/// Writes a workload file with `config.total_operations` operations to `output`.
///
/// The parameters are validated before the file is created.
pub fn generate(config: &Generate, output: &Path) -> Result<()> {
    let mut builder = Workload::builder()
        .key_count(config.key_count)
        .read_proportion(config.read_proportion)
        .value_length(config.value_length)
        .distribution(config.distribution)
        .skew(config.skew);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let mut workload = builder.build()?;

    let distribution = workload.distribution();
    let skew = match distribution {
        KeyDistribution::Zipfian(table) => Some(table.skew()),
        KeyDistribution::Uniform { .. } => None,
    };
    tracing::info!(
        seed = workload.seed(),
        distribution = %distribution.kind(),
        key_count = distribution.key_count(),
        skew,
        "generating workload"
    );

    let file = File::create(output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;
    let count = write_workload(
        workload.operations(config.total_operations),
        &config.client,
        file,
    )
    .with_context(|| format!("failed to write workload to {}", output.display()))?;

    println!("Generated {count} operations into {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use kvbench_workload::DistributionKind;

    use super::*;

    #[test]
    fn invalid_config_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("workload.txt");

        let config = Generate {
            read_proportion: 2.0,
            ..Default::default()
        };
        assert!(generate(&config, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn writes_requested_operations() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("workload.txt");

        let config = Generate {
            distribution: DistributionKind::Zipf,
            total_operations: 25,
            client: "./client".into(),
            seed: Some(5),
            ..Default::default()
        };
        generate(&config, &output).unwrap();

        let contents = std::fs::read_to_string(&output).unwrap();
        assert_eq!(contents.lines().count(), 25);
        assert!(contents.lines().all(|line| line.starts_with("./client ")));
    }

    #[test]
    fn unwritable_output() {
        let config = Generate::default();
        let result = generate(&config, Path::new("/nonexistent/dir/workload.txt"));
        assert!(result.is_err());
    }
}
