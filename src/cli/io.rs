//! Text I/O for the CLI
//!
//! - Input: one JSON document on stdin
//! - Output: UTF-8 text on stdout, one record per line

use std::io::{self, Read, Write};

use super::errors::{CliError, CliResult};

/// Read the whole of stdin as one document
pub fn read_input() -> CliResult<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(input)
}

/// Write a document to stdout
pub fn write_output(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}

/// Write lines to stdout
pub fn write_lines(lines: &[String]) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;

    Ok(())
}
