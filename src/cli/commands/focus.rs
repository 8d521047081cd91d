//! skilltree focus - Show the focus branch of a skill

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::colors;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::core::session::{EdgeView, SkillTree};
use crate::core::status::NodeStatus;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct FocusArgs {
    /// Skill ID to focus on
    pub skill: String,
}

#[derive(Debug, Serialize)]
struct BranchMember {
    id: String,
    name: String,
    status: NodeStatus,
}

#[derive(Debug, Serialize)]
struct FocusReport {
    focused: String,
    branch: Vec<BranchMember>,
    faded: usize,
    highlighted_edges: Vec<EdgeView>,
}

fn focus_report(tree: &mut SkillTree, skill_id: &str) -> Result<FocusReport> {
    tree.focus(skill_id)?;
    let mut branch = Vec::new();
    let mut faded = 0;
    for skill in tree.graph().skills() {
        if tree.is_faded(&skill.id) {
            faded += 1;
        } else {
            branch.push(BranchMember {
                id: skill.id.clone(),
                name: skill.name.clone(),
                status: tree.display_status(&skill.id),
            });
        }
    }
    let highlighted_edges = tree
        .edge_variants()
        .into_iter()
        .filter(|edge| edge.highlighted)
        .collect();
    Ok(FocusReport {
        focused: skill_id.to_string(),
        branch,
        faded,
        highlighted_edges,
    })
}

pub fn run(ctx: &AppContext, args: &FocusArgs) -> Result<()> {
    let mut tree = ctx.load_tree()?;
    let report = focus_report(&mut tree, &args.skill)?;
    debug!(target: "focus", skill = %args.skill, branch = report.branch.len(), faded = report.faded, "focus computed");

    match ctx.output_format {
        OutputFormat::Human => {
            let support = super::color_support(ctx);
            let mut layout = HumanLayout::new();
            layout.title(&format!("Focus: {}", report.focused));
            for member in &report.branch {
                let marker = if member.id == report.focused { "*" } else { " " };
                layout.push_line(format!(
                    "{marker} {:28} {}",
                    member.id,
                    colors::format_status(member.status, support)
                ));
            }
            layout.section("Edges");
            for edge in &report.highlighted_edges {
                layout.bullet(&format!(
                    "{} -> {} {}",
                    edge.parent,
                    edge.child,
                    colors::format_edge(edge.variant, support)
                ));
            }
            layout.push_line(String::new());
            layout.push_line(colors::muted(
                format!("{} skills outside the branch", report.faded),
                support,
            ));
            emit_human(layout);
        }
        OutputFormat::Json | OutputFormat::Jsonl => emit_json(&robot_ok(&report))?,
        OutputFormat::Plain | OutputFormat::Tsv => {
            for member in &report.branch {
                println!("{}\t{}", member.id, member.status);
            }
        }
    }
    Ok(())
}
