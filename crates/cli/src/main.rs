// crates/cli/src/main.rs
//! `convo-score` binary.
//!
//! Results go to stdout; logs go to stderr so output stays pipeable.

use anyhow::Result;
use clap::Parser;
use convo_score_cli::commands::{run_batch, run_score};
use convo_score_cli::{telemetry, Cli, CliConfig, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()?;
    telemetry::init(&config.log_filter)?;

    let format = cli.format.unwrap_or(config.format);
    let output = match cli.command {
        Command::Score { file } => run_score(&file, format)?,
        Command::Batch { dir } => run_batch(&dir, format)?,
    };
    println!("{output}");
    Ok(())
}
