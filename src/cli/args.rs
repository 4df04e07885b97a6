//! Defines the command-line arguments and subcommands for the Ash CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "ash",
    version,
    about = "Parse sentences of the Ash constructed language into sentence trees."
)]
pub struct AshArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one sentence and print its tree as JSON.
    Parse {
        /// The sentence to parse.
        #[arg(required = true)]
        sentence: String,
        /// Print the tree on a single line.
        #[arg(long)]
        compact: bool,
    },
    /// Parse every sentence in a file and print one tree per sentence.
    File {
        /// One sentence per line; blank lines and lines starting with '#' are skipped.
        #[arg(required = true)]
        file: PathBuf,
        /// Print each tree on a single line.
        #[arg(long)]
        compact: bool,
    },
    /// Check that every sentence in a file parses, with a pass/fail summary.
    Check {
        /// One sentence per line; blank lines and lines starting with '#' are skipped.
        #[arg(required = true)]
        file: PathBuf,
    },
}
