use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::AcquireError;

/// Errors that prevent a run from starting or completing.
///
/// Failures of individual commands are not part of this type, see
/// [`TaskError`](crate::process::TaskError).
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The run would execute no operations.
    #[error("total ops must be positive")]
    InvalidOps,

    /// The concurrency limit is zero or does not fit the semaphore.
    #[error("max concurrency must be positive and fit in 32 bits, got {0}")]
    InvalidConcurrency(usize),

    /// The start time is not of the form `YYYY-MM-DDTHH:MM:SS`.
    #[error("invalid start time '{input}', expected YYYY-MM-DDTHH:MM:SS")]
    InvalidStartTime {
        /// The rejected input.
        input: String,
        /// The reason it was rejected.
        #[source]
        source: humantime::TimestampError,
    },

    /// The command file could not be read.
    #[error("failed to read command file {}", path.display())]
    CommandFile {
        /// Path of the command file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The command list contains no non-blank lines.
    #[error("no commands to execute")]
    NoCommands,

    /// The admission gate was closed while tasks were still being launched.
    #[error("admission gate closed")]
    GateClosed(#[from] AcquireError),
}

/// Result type for the runner.
pub type Result<T, E = RunnerError> = std::result::Result<T, E>;
