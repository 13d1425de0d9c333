// crates/cli/src/lib.rs
pub mod cli;
pub mod commands;
pub mod config;
pub mod input;
pub mod output;
pub mod telemetry;

pub use cli::{Cli, Command};
pub use config::{CliConfig, ConfigError, OutputFormat};
