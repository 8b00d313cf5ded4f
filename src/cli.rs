//! Command-line surface of the `clippings` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "clippings")]
#[command(about = "Browse, search and define your Kindle clippings", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML). Defaults apply when it does not exist.
    #[arg(short, long, global = true, default_value = "clippings.toml")]
    pub config: PathBuf,

    /// Skip dictionary lookups for single-word clippings
    #[arg(long, global = true)]
    pub no_definitions: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every book of the index, shelved alphabetically
    Books,
    /// Show all clippings of one book
    Book {
        /// Title exactly as the clippings carry it
        original_title: String,
    },
    /// Show one random clipping
    Random,
    /// Find clippings whose content contains a phrase
    Search {
        /// Case-insensitive phrase
        query: String,
    },
}
