//! The list of commands replayed by the executor.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, RunnerError};

/// A non-empty list of trimmed shell commands, reused cyclically.
#[derive(Clone, Debug)]
pub struct CommandList {
    commands: Vec<String>,
}

impl CommandList {
    /// Creates a list from the given commands, dropping blank entries.
    pub fn new<I, S>(commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands: Vec<String> = commands
            .into_iter()
            .filter_map(|command| {
                let command = command.as_ref().trim();
                (!command.is_empty()).then(|| command.to_owned())
            })
            .collect();

        if commands.is_empty() {
            return Err(RunnerError::NoCommands);
        }
        Ok(Self { commands })
    }

    /// Parses one command per line.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text.lines())
    }

    /// Reads the command file at `path`.
    pub fn read_file(path: &Path) -> Result<Self> {
        let file_error = |source| RunnerError::CommandFile {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(file_error)?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .map_err(file_error)?;

        Self::new(lines)
    }

    /// The command for the `index`-th task, wrapping around at the end of the list.
    pub fn get(&self, index: usize) -> &str {
        &self.commands[index % self.commands.len()]
    }

    /// The number of distinct commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false`, as empty lists are rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines() {
        let input = "echo a\n\n   \n  echo b  \n\techo c\n";
        let commands = CommandList::parse(input).unwrap();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands.get(0), "echo a");
        assert_eq!(commands.get(1), "echo b");
        assert_eq!(commands.get(2), "echo c");
    }

    #[test]
    fn wraps_around() {
        let commands = CommandList::new(["a", "b", "c"]).unwrap();
        let used: Vec<_> = (0..7).map(|i| commands.get(i)).collect();
        assert_eq!(used, ["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            CommandList::new(["", "  ", "\t"]),
            Err(RunnerError::NoCommands)
        ));
        assert!(matches!(
            CommandList::new(Vec::<String>::new()),
            Err(RunnerError::NoCommands)
        ));
    }

    #[test]
    fn missing_file() {
        let result = CommandList::read_file(Path::new("/nonexistent/commands.txt"));
        assert!(matches!(result, Err(RunnerError::CommandFile { .. })));
    }
}
