//! Load-testing toolkit for key-value stores.
//!
//! See [`kvbench_cli`] for the available commands.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

fn main() -> anyhow::Result<()> {
    kvbench_cli::cli::execute()
}
