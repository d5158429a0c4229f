//! Temporary input files for tests.
//!
//! ```
//! let file = kvbench_test::files::command_file(["true", "", "echo hi"]);
//! let contents = std::fs::read_to_string(file.path()).unwrap();
//! assert_eq!(contents, "true\n\necho hi\n");
//! ```

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes the given lines to a temporary file, which is deleted when dropped.
pub fn command_file<I, S>(lines: I) -> NamedTempFile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line.as_ref()).unwrap();
    }
    file.flush().unwrap();
    file
}
