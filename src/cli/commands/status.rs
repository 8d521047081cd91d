//! skilltree status - Set the progress status of a skill

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::colors;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::session::SkillTree;
use crate::core::status::{NodeStatus, ProgressStatus};
use crate::error::Result;
use crate::storage::progress::ProgressRecord;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Skill ID
    pub skill: String,

    /// New status: locked, in_progress, completed, mastered
    pub status: ProgressStatus,
}

#[derive(Debug, Serialize)]
pub(super) struct ProgressChange {
    pub skill: String,
    pub display_status: NodeStatus,
    pub record: ProgressRecord,
    /// Dependents that became available with this change.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub newly_unlocked: Vec<String>,
    /// Dependents that lost availability with this change.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub newly_locked: Vec<String>,
}

fn dependent_statuses(tree: &SkillTree, skill_id: &str) -> Vec<(String, NodeStatus)> {
    tree.graph()
        .dependents_of(skill_id)
        .map(|dep| (dep.id.clone(), tree.display_status(&dep.id)))
        .collect()
}

/// Apply `change` and report how the direct dependents moved.
pub(super) fn track_change<F>(tree: &mut SkillTree, skill_id: &str, change: F) -> Result<ProgressChange>
where
    F: FnOnce(&mut SkillTree) -> Result<ProgressRecord>,
{
    let before = dependent_statuses(tree, skill_id);
    let record = change(tree)?;
    let after = dependent_statuses(tree, skill_id);

    let mut newly_unlocked = Vec::new();
    let mut newly_locked = Vec::new();
    for ((id, old), (_, new)) in before.into_iter().zip(after) {
        match (old, new) {
            (NodeStatus::Locked, NodeStatus::Unlocked) => newly_unlocked.push(id),
            (NodeStatus::Unlocked, NodeStatus::Locked) => newly_locked.push(id),
            _ => {}
        }
    }

    Ok(ProgressChange {
        skill: skill_id.to_string(),
        display_status: tree.display_status(skill_id),
        record,
        newly_unlocked,
        newly_locked,
    })
}

pub(super) fn emit_change(ctx: &AppContext, change: &ProgressChange) -> Result<()> {
    if ctx.output_format.is_machine() {
        return emit_json(&robot_ok(change));
    }
    let support = super::color_support(ctx);
    let mut layout = HumanLayout::new();
    layout
        .kv("Skill", &colors::skill_id(&change.skill, support))
        .kv("Status", &colors::format_status(change.display_status, support))
        .kv("Step", &change.record.current_step.to_string());
    if !change.record.note.is_empty() {
        layout.kv("Note", &change.record.note);
    }
    for id in &change.newly_unlocked {
        layout.bullet(&format!("unlocked {id}"));
    }
    for id in &change.newly_locked {
        layout.bullet(&format!("locked again {id}"));
    }
    emit_human(layout);
    Ok(())
}

pub fn run(ctx: &AppContext, args: &StatusArgs) -> Result<()> {
    let mut tree = ctx.load_tree()?;
    let change = track_change(&mut tree, &args.skill, |tree| {
        tree.set_status(&args.skill, args.status)
    })?;
    ctx.db.save_progress(&ctx.user, &args.skill, &change.record)?;
    info!(target: "progress", skill = %args.skill, status = %args.status, unlocked = change.newly_unlocked.len(), "status updated");
    emit_change(ctx, &change)
}
