//! Command line interface for kvbench.
//!
//! The `kvbench` binary bundles the two halves of a key-value load test:
//!
//! - `kvbench generate` synthesizes a workload file of client invocations with
//!   [`kvbench_workload`].
//! - `kvbench run` replays such a file against the system under test at a scheduled start time
//!   with [`kvbench_runner`], and reports the achieved throughput.

pub mod cli;
pub mod config;
pub mod generate;
pub mod observability;
pub mod run;
