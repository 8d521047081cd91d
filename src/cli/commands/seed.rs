//! skilltree seed - Load a YAML catalog into the database

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::graph::{GraphReport, SkillGraph};
use crate::error::Result;
use crate::storage::catalog::load_catalog;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Catalog directory (defaults to the configured catalog)
    pub dir: Option<PathBuf>,

    /// Ignore the catalog's progress.json
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct SeedReport {
    catalog: String,
    categories: usize,
    skills: usize,
    progress_imported: usize,
}

pub fn run(ctx: &AppContext, args: &SeedArgs) -> Result<()> {
    let dir = args.dir.clone().unwrap_or_else(|| ctx.catalog_dir());
    debug!(target: "seed", dir = %dir.display(), "loading catalog");

    let catalog = load_catalog(&dir)?;
    ctx.db.seed(&catalog.categories, &catalog.skills)?;

    let mut progress_imported = 0;
    if let (false, Some(file)) = (args.no_progress, catalog.progress.as_ref()) {
        let mut tree = ctx.load_tree()?;
        let changed = tree.import(file);
        progress_imported = super::persist(ctx, &tree, changed.iter().map(String::as_str))?;
    }

    let report = SeedReport {
        catalog: dir.display().to_string(),
        categories: catalog.categories.len(),
        skills: catalog.skills.len(),
        progress_imported,
    };
    info!(target: "seed", skills = report.skills, categories = report.categories, progress = progress_imported, "catalog seeded");

    let warnings = catalog_warnings(&SkillGraph::new(catalog.skills).validate());
    if ctx.output_format.is_machine() {
        return emit_json(&robot_ok(&report).with_warnings(warnings));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Catalog seeded")
        .kv("Catalog", &report.catalog)
        .kv("Categories", &report.categories.to_string())
        .kv("Skills", &report.skills.to_string())
        .kv("Progress", &format!("{progress_imported} records for {}", ctx.user));
    for warning in &warnings {
        layout.bullet(&format!("warning: {warning}"));
    }
    emit_human(layout);
    Ok(())
}

/// Problems the loader tolerates but a user should hear about.
fn catalog_warnings(report: &GraphReport) -> Vec<String> {
    report
        .dangling
        .iter()
        .map(|d| format!("{} requires unknown skill {}", d.skill_id, d.missing))
        .chain(
            report
                .cycles
                .iter()
                .map(|cycle| format!("prerequisite cycle: {}", cycle.join(", "))),
        )
        .collect()
}
