// crates/cli/src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "convo-score",
    about = "Score support conversations for accuracy, empathy, clarity and more",
    version
)]
pub struct Cli {
    /// Output format (overrides CONVO_SCORE_FORMAT)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a single conversation file
    Score {
        /// JSON file: an array of {"text": ...} turns, or {"messages": [...]}
        file: PathBuf,
    },
    /// Score every *.json conversation under a directory and print reports
    Batch {
        /// Directory to search recursively
        dir: PathBuf,
    },
}
