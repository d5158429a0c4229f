//! Serializes operations into a workload file of client invocations.

use std::fmt;
use std::io::{self, BufWriter, Write};

use crate::workload::Operation;

/// Client invocation used when none is configured.
pub const DEFAULT_CLIENT: &str = "/opt/craq/craq-client -c l-coord:1234";

/// Formats an [`Operation`] as a single command line for the given client.
///
/// Reads render as `<client> read <key>`, writes as `<client> write <key> <value>`.
#[derive(Debug)]
pub struct ClientCommand<'a> {
    client: &'a str,
    operation: &'a Operation,
}

impl<'a> ClientCommand<'a> {
    /// Wraps `operation` for display with the `client` invocation prefix.
    pub fn new(client: &'a str, operation: &'a Operation) -> Self {
        Self { client, operation }
    }
}

impl fmt::Display for ClientCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Operation::Read { key } => write!(f, "{} read {key}", self.client),
            Operation::Write { key, value } => write!(f, "{} write {key} {value}", self.client),
        }
    }
}

/// Writes one command line per operation to `writer` and returns the number of lines written.
pub fn write_workload<I, W>(operations: I, client: &str, writer: W) -> io::Result<usize>
where
    I: IntoIterator<Item = Operation>,
    W: Write,
{
    let mut writer = BufWriter::new(writer);
    let mut lines = 0;

    for operation in operations {
        writeln!(writer, "{}", ClientCommand::new(client, &operation))?;
        lines += 1;
    }

    writer.flush()?;
    Ok(lines)
}
