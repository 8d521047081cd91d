//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

pub mod colors;
pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "skilltree",
    version,
    about = "Track progress through a skill tree of prerequisites"
)]
pub struct Cli {
    /// Robot mode: JSON output on stdout, JSON logs on stderr
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format (defaults to json in robot mode, human otherwise)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (overrides global and project config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// User whose progress is read and written
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if self.robot => OutputFormat::Json,
            None => OutputFormat::Human,
        }
    }
}
