//! Replays a command file against a system under test and measures throughput.
//!
//! The [`Executor`] waits until a scheduled wall-clock start time, then runs exactly the requested
//! number of commands from a [`CommandList`], cycling through the list, with at most a fixed
//! number of commands in flight. Once every command has finished, it reports the elapsed time and
//! the resulting throughput as [`RunStats`].
//!
//! This is a throughput benchmark, not a correctness check: commands that fail or exit with a
//! non-zero status are logged and still count as completed. There are no retries and no per-task
//! timeouts, so a command that never exits stalls the run.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod commands;
pub mod error;
pub mod executor;
pub mod process;
pub mod schedule;
pub mod stats;

pub use crate::commands::CommandList;
pub use crate::error::RunnerError;
pub use crate::executor::{ExecutionPlan, Executor};
pub use crate::process::{CommandRunner, ShellRunner, TaskError};
pub use crate::stats::RunStats;
