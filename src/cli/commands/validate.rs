//! skilltree validate - Check the catalog graph for problems

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::cli::colors;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_failure, robot_ok};
use crate::core::graph::{GraphReport, SkillGraph};
use crate::error::{Result, SkillTreeError};
use crate::storage::catalog::load_catalog;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Validate a catalog directory instead of the stored catalog
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Treat dangling prerequisites as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ValidateOutput<'a> {
    source: String,
    skills: usize,
    clean: bool,
    report: &'a GraphReport,
}

fn failed(report: &GraphReport, strict: bool) -> bool {
    report.has_errors() || (strict && !report.dangling.is_empty())
}

fn summary(report: &GraphReport) -> String {
    format!(
        "{} duplicate ids, {} self loops, {} dangling prerequisites, {} cycles",
        report.duplicate_ids.len(),
        report.self_loops.len(),
        report.dangling.len(),
        report.cycles.len()
    )
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let (source, graph) = match &args.dir {
        Some(dir) => (
            dir.display().to_string(),
            SkillGraph::new(load_catalog(dir)?.skills),
        ),
        None => (
            ctx.config.database_path(&ctx.root).display().to_string(),
            SkillGraph::new(ctx.db.read_all()?),
        ),
    };
    let report = graph.validate();
    let failed = failed(&report, args.strict);
    info!(target: "validate", source = %source, skills = graph.len(), clean = report.is_clean(), "graph validated");

    if ctx.output_format.is_machine() {
        let output = ValidateOutput {
            source,
            skills: graph.len(),
            clean: report.is_clean(),
            report: &report,
        };
        if failed {
            emit_json(&robot_failure("validation_failed", summary(&report), &output))?;
        } else {
            emit_json(&robot_ok(&output))?;
        }
    } else {
        print_human(ctx, &source, graph.len(), &report);
    }

    if failed {
        warn!(target: "validate", "graph has errors");
        return Err(SkillTreeError::ValidationFailed(summary(&report)));
    }
    Ok(())
}

fn print_human(ctx: &AppContext, source: &str, skills: usize, report: &GraphReport) {
    let support = super::color_support(ctx);
    let mut layout = HumanLayout::new();
    layout
        .title("Graph validation")
        .kv("Source", source)
        .kv("Skills", &skills.to_string());

    if report.is_clean() {
        layout.push_line(String::new());
        layout.push_line(colors::styled("No problems found", |s| s.green(), support));
        emit_human(layout);
        return;
    }

    if !report.duplicate_ids.is_empty() {
        layout.section("Duplicate ids");
        for id in &report.duplicate_ids {
            layout.bullet(id);
        }
    }
    if !report.self_loops.is_empty() {
        layout.section("Self loops");
        for id in &report.self_loops {
            layout.bullet(id);
        }
    }
    if !report.dangling.is_empty() {
        layout.section("Dangling prerequisites");
        for dangling in &report.dangling {
            layout.bullet(&format!("{} requires {}", dangling.skill_id, dangling.missing));
        }
    }
    if !report.cycles.is_empty() {
        layout.section("Cycles");
        for cycle in &report.cycles {
            layout.bullet(&cycle.join(" <-> "));
        }
    }
    emit_human(layout);
}
