//! Replays a [`CommandList`] with bounded concurrency, starting at a scheduled instant.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime};

use indicatif::ProgressBar;
use tokio::sync::Semaphore;

use crate::commands::CommandList;
use crate::error::{Result, RunnerError};
use crate::process::CommandRunner;
use crate::schedule::{self, DEFAULT_POLL_INTERVAL};
use crate::stats::RunStats;

/// When to start, how much work to do, and how much of it may run at once.
#[derive(Clone, Copy, Debug)]
pub struct ExecutionPlan {
    start: SystemTime,
    total_ops: usize,
    max_concurrency: u32,
    poll_interval: Duration,
}

impl ExecutionPlan {
    /// Creates a plan running `total_ops` commands, at most `max_concurrency` at a time.
    pub fn new(start: SystemTime, total_ops: usize, max_concurrency: usize) -> Result<Self> {
        if total_ops == 0 {
            return Err(RunnerError::InvalidOps);
        }
        let max_concurrency = u32::try_from(max_concurrency)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(RunnerError::InvalidConcurrency(max_concurrency))?;

        Ok(Self {
            start,
            total_ops,
            max_concurrency,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Overrides how often the clock is checked while waiting for the start time.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The wall-clock start time.
    pub fn start(&self) -> SystemTime {
        self.start
    }

    /// The exact number of commands to run.
    pub fn total_ops(&self) -> usize {
        self.total_ops
    }

    /// The maximum number of commands in flight.
    pub fn max_concurrency(&self) -> u32 {
        self.max_concurrency
    }
}

/// Runs commands from a [`CommandList`] through a [`CommandRunner`].
#[derive(Debug)]
pub struct Executor<R> {
    commands: Arc<CommandList>,
    runner: Arc<R>,
}

impl<R: CommandRunner> Executor<R> {
    /// Creates an executor cycling through `commands`.
    pub fn new(commands: CommandList, runner: R) -> Self {
        Self {
            commands: Arc::new(commands),
            runner: Arc::new(runner),
        }
    }

    /// Waits for the plan's start time and then executes it.
    pub async fn run(&self, plan: &ExecutionPlan) -> Result<RunStats> {
        tracing::info!(
            start = %humantime::format_rfc3339_seconds(plan.start),
            "waiting for start time"
        );
        schedule::wait_until(plan.start, plan.poll_interval).await;

        self.execute(plan.total_ops, plan.max_concurrency).await
    }

    /// Runs exactly `total_ops` commands immediately, at most `max_concurrency` at a time.
    ///
    /// Task `i` runs command `i` of the list, wrapping around. Every task counts as completed
    /// once its command has finished, regardless of the outcome.
    pub async fn execute(&self, total_ops: usize, max_concurrency: u32) -> Result<RunStats> {
        if total_ops == 0 {
            return Err(RunnerError::InvalidOps);
        }
        if max_concurrency == 0 {
            return Err(RunnerError::InvalidConcurrency(0));
        }

        tracing::info!(total_ops, max_concurrency, "starting run");

        let semaphore = Arc::new(Semaphore::new(max_concurrency as usize));
        let completed = Arc::new(AtomicU64::new(0));
        let bar = ProgressBar::new(total_ops as u64);

        let start = Instant::now();

        for index in 0..total_ops {
            let permit = semaphore.clone().acquire_owned().await?;

            let commands = Arc::clone(&self.commands);
            let runner = Arc::clone(&self.runner);
            let completed = Arc::clone(&completed);
            let bar = bar.clone();

            tokio::spawn(async move {
                let command = commands.get(index);
                if let Err(error) = runner.run(command).await {
                    tracing::debug!(
                        error = &error as &dyn std::error::Error,
                        command,
                        "command failed"
                    );
                }

                completed.fetch_add(1, Ordering::Relaxed);
                bar.inc(1);
                drop(permit);
            });
        }

        tracing::info!("all tasks launched, draining");

        // by acquiring *all* the permits, we wait for all outstanding tasks to finish
        let _permits = semaphore.acquire_many(max_concurrency).await?;

        let stats = RunStats {
            completed: completed.load(Ordering::Relaxed),
            elapsed: start.elapsed(),
        };
        bar.finish_and_clear();

        tracing::info!(
            completed = stats.completed,
            elapsed = ?stats.elapsed,
            "run completed"
        );
        Ok(stats)
    }
}
