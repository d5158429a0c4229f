use std::path::Path;

use anyhow::Result;
use kvbench_runner::schedule::parse_start_time;
use kvbench_runner::stats::print_report;
use kvbench_runner::{CommandList, ExecutionPlan, Executor, ShellRunner};

use crate::config::Run;

/// Replays the command file at `file`, starting at `start`, and prints the throughput.
pub async fn run(config: &Run, start: &str, file: &Path) -> Result<()> {
    let start = parse_start_time(start)?;
    let commands = CommandList::read_file(file)?;
    tracing::debug!(commands = commands.len(), "loaded command file");

    let plan = ExecutionPlan::new(start, config.ops, config.concurrency)?
        .with_poll_interval(config.poll_interval);

    let executor = Executor::new(commands, ShellRunner::new(config.shell.as_str()));
    let stats = executor.run(&plan).await?;

    println!();
    print_report(&stats);
    Ok(())
}
