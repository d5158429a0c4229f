//! Statistics of a finished run.

use std::time::Duration;

use yansi::Paint;

/// Completion statistics of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStats {
    /// Number of commands that ran to completion, successful or not.
    pub completed: u64,
    /// Time from launching the first task until the last one finished.
    pub elapsed: Duration,
}

impl RunStats {
    /// The elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Completed operations per second, or infinity if no measurable time has passed.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.completed as f64 / secs
        } else {
            f64::INFINITY
        }
    }
}

/// Prints a human-readable summary of the run to stdout.
pub fn print_report(stats: &RunStats) {
    println!("{}", "## RESULTS".bold());
    println!("  total operations: {}", stats.completed.bold());
    println!("  total time: {:.2} s", stats.elapsed_secs().bold());
    println!(
        "  average throughput: {:.2} operations/s",
        stats.throughput().bold().green()
    );
}
