//! CLI module for schemacodec
//!
//! Provides command-line interface for:
//! - definitions: List the resource definitions of a specification
//! - normalize: Rewrite a JSON document in its canonical sparse form

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{definitions, describe_definitions, normalize, normalize_document, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_lines, write_output};
