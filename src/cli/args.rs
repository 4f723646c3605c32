//! CLI argument definitions using clap
//!
//! Commands:
//! - schemacodec definitions --spec <path>
//! - schemacodec normalize --spec <path> --type <name> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// schemacodec - schema-driven JSON normalization
#[derive(Parser, Debug)]
#[command(name = "schemacodec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the resource definitions of a specification
    Definitions {
        /// Specification file, or a directory of `*.json` files
        #[arg(long)]
        spec: PathBuf,
    },

    /// Read a JSON document from stdin and write its canonical sparse form
    Normalize {
        /// Specification file, or a directory of `*.json` files
        #[arg(long)]
        spec: PathBuf,

        /// Resource definition the document conforms to
        #[arg(long = "type")]
        type_name: String,

        /// Path to codec configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
