//! skilltree list - List skills with filters and sorting

use std::collections::BTreeSet;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::colors::{self, ColorSupport};
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::filter::{SkillFilters, SkillQuery, StatusFilter};
use crate::core::session::SkillTree;
use crate::core::skill::{Skill, SkillType};
use crate::core::sort::{ListSortBy, progress_fill};
use crate::core::status::NodeStatus;
use crate::core::unlock::StatusLookup;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only these sports (repeatable; defaults to the configured view)
    #[arg(long)]
    pub sport: Vec<String>,

    /// Only these categories (repeatable)
    #[arg(long)]
    pub category: Vec<String>,

    /// Only this type: skill, transition (repeatable)
    #[arg(long = "type")]
    pub skill_type: Vec<SkillType>,

    /// Only this status: locked, unlocked, in_progress, completed, mastered (repeatable)
    #[arg(long)]
    pub status: Vec<StatusFilter>,

    /// Sort by: default, difficulty-asc, difficulty-desc, status, progress
    #[arg(long)]
    pub sort: Option<ListSortBy>,
}

impl ListArgs {
    fn query(&self, ctx: &AppContext) -> SkillQuery {
        let sports = if self.sport.is_empty() {
            &ctx.config.view.sports
        } else {
            &self.sport
        };
        SkillQuery {
            filters: SkillFilters {
                sport: sports.iter().cloned().collect(),
                skill_type: self.skill_type.iter().copied().collect(),
                category: self.category.iter().cloned().collect(),
                status: self.status.iter().copied().collect::<BTreeSet<_>>(),
            },
            sort: self.sort.unwrap_or(ctx.config.view.default_sort),
        }
    }
}

/// Serializable skill entry for JSON/JSONL output
#[derive(Debug, Clone, Serialize)]
struct SkillEntry {
    id: String,
    name: String,
    sport: String,
    category: Option<String>,
    #[serde(rename = "type")]
    skill_type: SkillType,
    difficulty: u32,
    status: NodeStatus,
    current_step: i32,
    total_steps: usize,
    progress: f64,
}

impl SkillEntry {
    fn new(skill: &Skill, status: NodeStatus, tree: &SkillTree) -> Self {
        let current_step = tree.current_step(&skill.id);
        Self {
            id: skill.id.clone(),
            name: skill.name.clone(),
            sport: skill.sport.clone(),
            category: skill.category_id.clone(),
            skill_type: skill.skill_type,
            difficulty: skill.difficulty,
            status,
            current_step,
            total_steps: skill.total_steps(),
            progress: progress_fill(tree.status_of(&skill.id), skill.total_steps(), current_step),
        }
    }
}

#[derive(Serialize)]
struct ListData<'a> {
    count: usize,
    sort: ListSortBy,
    filters: &'a SkillFilters,
    skills: &'a [SkillEntry],
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    debug!(target: "list", mode = ?ctx.output_format, "output mode selected");

    let tree = ctx.load_tree()?;
    let query = args.query(ctx);
    let entries: Vec<SkillEntry> = tree
        .query(&query)
        .into_iter()
        .map(|(skill, status)| SkillEntry::new(skill, status, &tree))
        .collect();

    debug!(target: "list", count = entries.len(), sort = %query.sort, "listing skills");

    match ctx.output_format {
        OutputFormat::Human => display_human(&entries, super::color_support(ctx)),
        OutputFormat::Json | OutputFormat::Jsonl => {
            let data = ListData {
                count: entries.len(),
                sort: query.sort,
                filters: &query.filters,
                skills: &entries,
            };
            emit_machine(ctx.output_format, &data, &entries)?;
        }
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}\t{}\t{}", entry.id, entry.status, entry.sport);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tname\tsport\tcategory\ttype\tdifficulty\tstatus\tprogress");
            for entry in &entries {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.0}",
                    entry.id,
                    entry.name,
                    entry.sport,
                    entry.category.as_deref().unwrap_or("-"),
                    entry.skill_type,
                    entry.difficulty,
                    entry.status,
                    entry.progress,
                );
            }
        }
    }
    Ok(())
}

fn display_human(entries: &[SkillEntry], support: ColorSupport) {
    if entries.is_empty() {
        println!("No skills found");
        println!();
        println!("Load a catalog with: skilltree seed <dir>");
        return;
    }

    println!(
        "{:28} {:28} {:12} {:>4}  {:10}",
        "ID", "NAME", "STATUS", "DIFF", "PROGRESS"
    );
    println!("{}", "─".repeat(86));

    for entry in entries {
        // pad outside the escape codes so columns stay aligned
        let pad = " ".repeat(12usize.saturating_sub(entry.status.as_str().len()));
        let status = format!("{}{pad}", colors::format_status(entry.status, support));
        println!(
            "{:28} {:28} {} {:>4}  {}",
            truncate(&entry.id, 28),
            truncate(&entry.name, 28),
            status,
            entry.difficulty,
            colors::progress_bar(entry.progress, entry.status, support),
        );
    }

    println!();
    println!("Total: {} skills", entries.len());
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}…", text.chars().take(width - 1).collect::<String>())
    } else {
        text.to_string()
    }
}
