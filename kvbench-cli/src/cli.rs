use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;

use crate::config::{Config, Generate};
use crate::{generate, observability, run};

/// Load-testing toolkit for key-value stores.
#[derive(Debug, FromArgs)]
struct Args {
    /// path to the YAML configuration file
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
enum Command {
    Generate(GenerateCommand),
    Run(RunCommand),
    Version(VersionCommand),
}

/// generate a workload file of read and write operations
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "generate")]
struct GenerateCommand {
    /// number of distinct keys
    #[argh(option)]
    key_count: Option<usize>,

    /// proportion of read operations, between 0 and 1
    #[argh(option)]
    read_proportion: Option<f64>,

    /// length of the values of write operations
    #[argh(option)]
    value_length: Option<usize>,

    /// key distribution, either `uniform` or `zipf`
    #[argh(option)]
    distribution: Option<String>,

    /// skew of the zipf distribution
    #[argh(option)]
    skew: Option<f64>,

    /// total number of operations to generate
    #[argh(option)]
    total_operations: Option<usize>,

    /// client invocation at the start of every line
    #[argh(option)]
    client: Option<String>,

    /// seed for a reproducible workload
    #[argh(option)]
    seed: Option<u64>,

    /// path of the workload file to write
    #[argh(positional)]
    output: PathBuf,
}

impl GenerateCommand {
    /// Overrides the configured parameters with the ones given on the command line.
    fn apply(&self, config: &mut Generate) -> Result<()> {
        if let Some(key_count) = self.key_count {
            config.key_count = key_count;
        }
        if let Some(read_proportion) = self.read_proportion {
            config.read_proportion = read_proportion;
        }
        if let Some(value_length) = self.value_length {
            config.value_length = value_length;
        }
        if let Some(distribution) = &self.distribution {
            config.distribution = distribution.parse()?;
        }
        if let Some(skew) = self.skew {
            config.skew = skew;
        }
        if let Some(total_operations) = self.total_operations {
            config.total_operations = total_operations;
        }
        if let Some(client) = &self.client {
            config.client.clone_from(client);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(())
    }
}

/// replay a command file against the system under test
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "run")]
struct RunCommand {
    /// start time as YYYY-MM-DDTHH:MM:SS, in UTC
    #[argh(option)]
    start: Option<String>,

    /// path to the command file, one shell command per line
    #[argh(option)]
    file: Option<PathBuf>,

    /// total number of commands to execute
    #[argh(option)]
    ops: Option<usize>,

    /// maximum number of commands in flight
    #[argh(option)]
    concurrency: Option<usize>,
}

/// print the kvbench version
#[derive(Default, Debug, FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCommand {}

/// Renders the `--help` output of the given command.
fn usage<T: FromArgs>(command_name: &[&str]) -> String {
    match T::from_args(command_name, &["--help"]) {
        Err(early_exit) => early_exit.output,
        Ok(_) => String::new(),
    }
}

/// Bootstrap the runtime and execute the CLI command.
pub fn execute() -> Result<()> {
    let args: Args = argh::from_env();

    // Special switch to just print the version and exit.
    if let Command::Version(_) = args.command {
        println!("kvbench {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = Config::load(args.config.as_deref())?;

    observability::init_tracing();

    match args.command {
        Command::Generate(command) => {
            command.apply(&mut config.generate)?;
            tracing::debug!(?config);

            generate::generate(&config.generate, &command.output)
        }
        Command::Run(command) => {
            if let Some(ops) = command.ops {
                config.run.ops = ops;
            }
            if let Some(concurrency) = command.concurrency {
                config.run.concurrency = concurrency;
            }
            tracing::debug!(?config);

            let (Some(start), Some(file)) = (command.start, command.file) else {
                println!("--start and --file are required\n");
                println!("{}", usage::<RunCommand>(&["kvbench", "run"]));
                return Ok(());
            };
            if config.run.ops == 0 {
                println!("--ops must be positive\n");
                println!("{}", usage::<RunCommand>(&["kvbench", "run"]));
                return Ok(());
            }

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .thread_name("kvbench-rt")
                .enable_all()
                .worker_threads(config.runtime.worker_threads.max(1))
                .build()?;

            runtime.block_on(run::run(&config.run, &start, &file))
        }
        Command::Version(VersionCommand {}) => unreachable!(),
    }
}
