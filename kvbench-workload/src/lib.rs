//! Synthesizes key-value workloads for load tests.
//!
//! A [`Workload`] draws a stream of read and write [`Operation`]s. For each operation it first
//! decides between read and write with the configured read proportion, then samples a key from a
//! [`KeyDistribution`], and finally generates a random alphanumeric value for writes.
//!
//! Keys follow either a *uniform* distribution, or a *Zipfian* one where a few low-index keys
//! receive most of the traffic, which models the hot keys seen by real caches and stores.
//!
//! The operations are written to a workload file with [`write_workload`], one client invocation
//! per line, which can then be replayed by the `kvbench-runner`.
//!
//! ```
//! use kvbench_workload::{DistributionKind, Workload};
//!
//! let mut workload = Workload::builder()
//!     .key_count(100)
//!     .read_proportion(0.9)
//!     .distribution(DistributionKind::Zipf)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! for operation in workload.operations(10) {
//!     assert!(operation.key().index() < 100);
//! }
//! ```
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod distribution;
pub mod error;
pub mod output;
pub mod workload;

pub use crate::distribution::{DEFAULT_SKEW, DistributionKind, KeyDistribution, ZipfianTable};
pub use crate::error::WorkloadError;
pub use crate::output::{ClientCommand, DEFAULT_CLIENT, write_workload};
pub use crate::workload::{Key, Operation, Workload, WorkloadBuilder};
