//! skilltree show - Show one skill with its prerequisites and progress

use clap::Args;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::colors::{self, ColorSupport};
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::core::session::SkillTree;
use crate::core::skill::Skill;
use crate::core::sort::progress_fill;
use crate::core::status::NodeStatus;
use crate::error::{Result, SkillTreeError};
use crate::storage::progress::ProgressRecord;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Skill ID
    pub skill: String,
}

#[derive(Debug, Serialize)]
struct Neighbour {
    id: String,
    status: NodeStatus,
}

#[derive(Debug, Serialize)]
struct SkillDetail<'a> {
    skill: &'a Skill,
    status: NodeStatus,
    unlocked: bool,
    progress: ProgressRecord,
    fill: f64,
    prerequisites: Vec<Neighbour>,
    /// Prerequisite ids with no matching skill.
    missing: Vec<&'a str>,
    dependents: Vec<Neighbour>,
}

fn detail<'a>(tree: &'a SkillTree, skill: &'a Skill) -> SkillDetail<'a> {
    let graph = tree.graph();
    let progress = tree.progress().get_progress(&skill.id);
    let (prerequisites, missing): (Vec<_>, Vec<_>) = skill
        .requires
        .iter()
        .partition(|id| graph.contains(id.as_str()));
    SkillDetail {
        skill,
        status: tree.display_status(&skill.id),
        unlocked: tree.is_unlocked(&skill.id),
        fill: progress_fill(progress.status, skill.total_steps(), progress.current_step),
        progress,
        prerequisites: prerequisites
            .into_iter()
            .map(|id| Neighbour {
                id: id.clone(),
                status: tree.display_status(id),
            })
            .collect(),
        missing: missing.into_iter().map(String::as_str).collect(),
        dependents: graph
            .dependents_of(&skill.id)
            .map(|dep| Neighbour {
                id: dep.id.clone(),
                status: tree.display_status(&dep.id),
            })
            .collect(),
    }
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let tree = ctx.load_tree()?;
    let skill = tree
        .graph()
        .get(&args.skill)
        .ok_or_else(|| SkillTreeError::SkillNotFound(args.skill.clone()))?;
    let detail = detail(&tree, skill);
    debug!(target: "show", skill = %skill.id, status = %detail.status, "skill resolved");

    match ctx.output_format {
        OutputFormat::Human => show_human(&detail, super::color_support(ctx)),
        OutputFormat::Json => emit_json(&robot_ok(&detail))?,
        OutputFormat::Jsonl => println!("{}", serde_json::to_string(&detail)?),
        OutputFormat::Plain => println!("{}\t{}\t{}", skill.id, detail.status, skill.name),
        OutputFormat::Tsv => {
            println!("id\tname\tstatus\tcurrent_step\ttotal_steps\trequires");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                skill.id,
                skill.name,
                detail.status,
                detail.progress.current_step,
                skill.total_steps(),
                skill.requires.join(","),
            );
        }
    }
    Ok(())
}

fn show_human(detail: &SkillDetail<'_>, support: ColorSupport) {
    let skill = detail.skill;
    let mut layout = HumanLayout::new();
    layout.title(&skill.name);
    layout
        .kv("ID", &colors::skill_id(&skill.id, support))
        .kv("Sport", &skill.sport)
        .kv("Category", skill.category_id.as_deref().unwrap_or("-"))
        .kv("Type", skill.skill_type.as_str())
        .kv("Difficulty", &skill.difficulty.to_string())
        .kv("Status", &colors::format_status(detail.status, support))
        .kv(
            "Progress",
            &format!(
                "{} {}/{}",
                colors::progress_bar(detail.fill, detail.status, support),
                detail.progress.current_step.max(0),
                skill.total_steps()
            ),
        );
    if let Some(description) = &skill.description {
        layout.kv("Description", description);
    }
    if !detail.progress.note.is_empty() {
        layout.kv("Note", &detail.progress.note);
    }

    if !skill.progressions.is_empty() {
        layout.section("Progressions");
        let done = usize::try_from(detail.progress.current_step.max(0)).unwrap_or_default();
        for (idx, step) in skill.progressions.iter().enumerate() {
            let mark = if idx < done { "x" } else { " " };
            let criteria = step
                .mastery_criteria
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            layout.push_line(format!("[{mark}] {}{criteria}", step.name));
        }
    }

    layout.section("Requires");
    if detail.prerequisites.is_empty() && detail.missing.is_empty() {
        layout.push_line(colors::muted("none", support));
    }
    for neighbour in &detail.prerequisites {
        layout.bullet(&format!(
            "{} {}",
            neighbour.id,
            colors::format_status(neighbour.status, support)
        ));
    }
    if !detail.missing.is_empty() {
        layout.bullet(&format!(
            "unknown: {}",
            detail.missing.iter().join(", ")
        ));
    }

    if !detail.dependents.is_empty() {
        layout.section("Unlocks");
        for neighbour in &detail.dependents {
            layout.bullet(&format!(
                "{} {}",
                neighbour.id,
                colors::format_status(neighbour.status, support)
            ));
        }
    }

    emit_human(layout);
}
