//! skilltree edges - List prerequisite edges with their variants

use std::collections::HashSet;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::colors;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::session::{EdgeView, SkillTree};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct EdgesArgs {
    /// Highlight the branch of this skill
    #[arg(long)]
    pub focus: Option<String>,

    /// Only edges whose child is in these sports (repeatable)
    #[arg(long)]
    pub sport: Vec<String>,

    /// Only highlighted edges (needs --focus)
    #[arg(long, requires = "focus")]
    pub highlighted_only: bool,
}

#[derive(Serialize)]
struct EdgesData<'a> {
    count: usize,
    focus: Option<&'a str>,
    edges: &'a [EdgeView],
}

fn collect_edges(tree: &mut SkillTree, args: &EdgesArgs) -> Result<Vec<EdgeView>> {
    if let Some(skill) = &args.focus {
        tree.focus(skill)?;
    }
    let sports: HashSet<&str> = args.sport.iter().map(String::as_str).collect();
    let edges = tree.edge_variants();
    let graph = tree.graph();
    Ok(edges
        .into_iter()
        .filter(|edge| !args.highlighted_only || edge.highlighted)
        .filter(|edge| {
            sports.is_empty()
                || graph
                    .get(&edge.child)
                    .is_some_and(|child| sports.contains(child.sport.as_str()))
        })
        .collect())
}

pub fn run(ctx: &AppContext, args: &EdgesArgs) -> Result<()> {
    let mut tree = ctx.load_tree()?;
    let edges = collect_edges(&mut tree, args)?;
    debug!(target: "edges", count = edges.len(), evaluations = tree.edge_evaluations(), "edges resolved");

    match ctx.output_format {
        OutputFormat::Human => {
            let support = super::color_support(ctx);
            if edges.is_empty() {
                println!("No edges");
                return Ok(());
            }
            for edge in &edges {
                let line = format!(
                    "{:28} -> {:28} {}",
                    edge.parent,
                    edge.child,
                    colors::format_edge(edge.variant, support)
                );
                if args.focus.is_some() && !edge.highlighted {
                    println!("{}", colors::muted(line, support));
                } else {
                    println!("{line}");
                }
            }
            println!();
            println!("Total: {} edges", edges.len());
        }
        OutputFormat::Json | OutputFormat::Jsonl => {
            let data = EdgesData {
                count: edges.len(),
                focus: args.focus.as_deref(),
                edges: &edges,
            };
            emit_machine(ctx.output_format, &data, &edges)?;
        }
        OutputFormat::Plain => {
            for edge in &edges {
                println!("{}\t{}\t{}", edge.parent, edge.child, edge.variant);
            }
        }
        OutputFormat::Tsv => {
            println!("parent\tchild\tvariant\thighlighted");
            for edge in &edges {
                println!(
                    "{}\t{}\t{}\t{}",
                    edge.parent, edge.child, edge.variant, edge.highlighted
                );
            }
        }
    }
    Ok(())
}
