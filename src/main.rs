//! skilltree - Skill tree progress tracker
//!
//! Load a sport skill catalog, track progress per user, and inspect the
//! prerequisite graph from the terminal.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skilltree::app::AppContext;
use skilltree::cli::Cli;
use skilltree::{Result, SkillTreeError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // validate already emitted its own error envelope
                if !matches!(e, SkillTreeError::ValidationFailed(_)) {
                    let error_json = serde_json::json!({
                        "error": true,
                        "code": e.code(),
                        "message": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&error_json).unwrap_or_default());
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skilltree::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skilltree=info",
        1 => "info,skilltree=debug",
        2 => "debug,skilltree=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
