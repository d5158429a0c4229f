//! Test utilities for kvbench.
//!
//! See the modules for all available utilities.

pub mod files;
pub mod tracing;
