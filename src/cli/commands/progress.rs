//! skilltree progress - Export or import progress files

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::storage::catalog::{read_progress_file, write_progress_file};

#[derive(Args, Debug)]
pub struct ProgressArgs {
    #[command(subcommand)]
    pub command: ProgressCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommand {
    /// Write the current user's progress as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Merge a progress file into the current user's progress
    Import {
        /// Progress file to read
        file: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct ImportReport {
    file: String,
    entries: usize,
    changed: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &ProgressArgs) -> Result<()> {
    match &args.command {
        ProgressCommand::Export { out } => export(ctx, out.as_ref()),
        ProgressCommand::Import { file } => import(ctx, file),
    }
}

fn export(ctx: &AppContext, out: Option<&PathBuf>) -> Result<()> {
    let file = ctx.load_tree()?.export();
    let Some(path) = out else {
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    };

    write_progress_file(path, &file)?;
    info!(target: "progress", path = %path.display(), entries = file.skills.len(), "progress exported");
    if ctx.output_format.is_machine() {
        return emit_json(&robot_ok(serde_json::json!({
            "file": path.display().to_string(),
            "entries": file.skills.len(),
        })));
    }
    println!("Exported {} entries to {}", file.skills.len(), path.display());
    Ok(())
}

fn import(ctx: &AppContext, path: &PathBuf) -> Result<()> {
    let file = read_progress_file(path)?;
    let mut tree = ctx.load_tree()?;
    let changed = tree.import(&file);
    super::persist(ctx, &tree, changed.iter().map(String::as_str))?;
    info!(target: "progress", path = %path.display(), changed = changed.len(), "progress imported");

    let report = ImportReport {
        file: path.display().to_string(),
        entries: file.skills.len(),
        changed,
    };
    if ctx.output_format.is_machine() {
        return emit_json(&robot_ok(&report));
    }
    let mut layout = HumanLayout::new();
    layout
        .title("Progress imported")
        .kv("File", &report.file)
        .kv("Entries", &report.entries.to_string())
        .kv("Changed", &report.changed.len().to_string());
    for id in &report.changed {
        layout.bullet(id);
    }
    emit_human(layout);
    Ok(())
}
