//! YAML catalog loader.
//!
//! Layout:
//!
//! ```text
//! <root>/categories.yaml        categories: [...]
//! <root>/<sport>/*.yaml         a skill list, a `skills:` map, or one skill
//! <root>/progress.json          optional progress file
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::graph::SkillGraph;
use crate::core::skill::{Category, Skill};
use crate::error::{Result, SkillTreeError};
use crate::storage::progress::ProgressFile;

pub const CATEGORIES_FILE: &str = "categories.yaml";
pub const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub skills: Vec<Skill>,
    pub progress: Option<ProgressFile>,
}

#[derive(Deserialize)]
struct CategoriesDoc {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillDoc {
    List(Vec<Skill>),
    Wrapped { skills: Vec<Skill> },
    Single(Box<Skill>),
}

impl SkillDoc {
    fn into_skills(self) -> Vec<Skill> {
        match self {
            Self::List(skills) | Self::Wrapped { skills } => skills,
            Self::Single(skill) => vec![*skill],
        }
    }
}

/// Load a catalog directory.
///
/// Duplicate ids and self loops are rejected. Dangling prerequisites and
/// cycles are logged; `validate` reports them in full.
pub fn load_catalog(root: &Path) -> Result<Catalog> {
    if !root.is_dir() {
        return Err(SkillTreeError::MissingConfig(format!(
            "catalog directory not found: {}",
            root.display()
        )));
    }

    let categories_path = root.join(CATEGORIES_FILE);
    let categories = if categories_path.is_file() {
        let raw = fs::read_to_string(&categories_path)?;
        serde_yaml::from_str::<CategoriesDoc>(&raw)
            .map_err(|e| parse_error(&categories_path, &e))?
            .categories
    } else {
        warn!(target: "catalog", path = %categories_path.display(), "no categories file");
        Vec::new()
    };

    let mut skills = Vec::new();
    for path in skill_files(root) {
        let Some(sport) = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
        else {
            continue;
        };
        let raw = fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            continue;
        }
        let doc: SkillDoc = serde_yaml::from_str(&raw).map_err(|e| parse_error(&path, &e))?;
        let loaded = doc.into_skills();
        debug!(target: "catalog", path = %path.display(), sport, count = loaded.len(), "skill file read");
        skills.extend(loaded.into_iter().map(|mut skill| {
            skill.sport = sport.to_string();
            skill
        }));
    }

    check_catalog(&skills)?;

    let progress_path = root.join(PROGRESS_FILE);
    let progress = if progress_path.is_file() {
        Some(read_progress_file(&progress_path)?)
    } else {
        None
    };

    Ok(Catalog {
        categories,
        skills,
        progress,
    })
}

pub fn read_progress_file(path: &Path) -> Result<ProgressFile> {
    let raw = fs::read_to_string(path)?;
    let file: ProgressFile = serde_json::from_str(&raw)?;
    if file.version != crate::storage::progress::PROGRESS_FILE_VERSION {
        warn!(target: "catalog", path = %path.display(), version = %file.version, "unexpected progress file version");
    }
    Ok(file)
}

pub fn write_progress_file(path: &Path, file: &ProgressFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(file)?)?;
    Ok(())
}

/// `*.yaml` files one level below `root`, sorted by path.
fn skill_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    files.sort();
    files
}

fn check_catalog(skills: &[Skill]) -> Result<()> {
    let graph = SkillGraph::new(skills.to_vec());
    let report = graph.validate();
    if let Some(id) = report.duplicate_ids.first() {
        return Err(SkillTreeError::InvalidSkill(format!("duplicate skill id: {id}")));
    }
    if let Some(id) = report.self_loops.first() {
        return Err(SkillTreeError::InvalidSkill(format!("{id} requires itself")));
    }
    for dangling in &report.dangling {
        warn!(target: "catalog", skill = %dangling.skill_id, missing = %dangling.missing, "unknown prerequisite");
    }
    for cycle in &report.cycles {
        warn!(target: "catalog", cycle = %cycle.join(" -> "), "prerequisite cycle");
    }
    Ok(())
}

fn parse_error(path: &Path, err: &serde_yaml::Error) -> SkillTreeError {
    SkillTreeError::Serialization(format!("{}: {err}", path.display()))
}
