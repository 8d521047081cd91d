use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::graph::SkillGraph;
use crate::core::skill::Skill;

/// A -> B -> C, plus unrelated D, all in sport `s1`.
#[must_use]
pub fn chain_graph() -> SkillGraph {
    SkillGraph::new(vec![
        Skill::new("A", "s1"),
        Skill::new("B", "s1").with_requires(["A"]),
        Skill::new("C", "s1").with_requires(["B"]),
        Skill::new("D", "s1"),
    ])
}

/// Linear chain `n0 -> n1 -> ... -> n{len-1}`.
#[must_use]
pub fn linear_graph(len: usize) -> SkillGraph {
    SkillGraph::new(
        (0..len)
            .map(|i| {
                let skill = Skill::new(format!("n{i}"), "s1");
                if i == 0 {
                    skill
                } else {
                    skill.with_requires([format!("n{}", i - 1)])
                }
            })
            .collect(),
    )
}

const CATEGORIES: &str = "\
categories:
  - id: pull
    name: Pull
    color: '#3b82f6'
  - id: push
    name: Push
    color: '#ef4444'
    description: Pressing strength
";

const BEGINNER: &str = "\
- id: dead-hang
  name: Dead Hang
  category: pull
  difficulty: 1
- id: pull-up
  name: Pull-up
  abbr: PU
  category: pull
  difficulty: 2
  requires: [dead-hang]
- id: push-up
  name: Push-up
  category: push
  difficulty: 1
  requires: null
";

const INTERMEDIATE: &str = "\
- id: front-lever
  name: Front Lever
  abbr: FL
  category: pull
  difficulty: 7
  progressions:
    - name: Tuck
      mastery_criteria: 3x10s
    - name: Straddle
  requires: [pull-up]
";

/// Catalog directory on disk, removed on drop.
pub struct CatalogFixture {
    pub temp_dir: TempDir,
    root: PathBuf,
}

impl CatalogFixture {
    #[must_use]
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        println!("[FIXTURE] Created catalog directory: {root:?}");
        Self { temp_dir, root }
    }

    /// Two categories, two sports, four skills.
    #[must_use]
    pub fn calisthenics() -> Self {
        let fixture = Self::empty();
        fixture.write("categories.yaml", CATEGORIES);
        fixture.write("calisthenics-beginner/basics.yaml", BEGINNER);
        fixture.write("calisthenics-intermediate/levers.yaml", INTERMEDIATE);
        fixture
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` at `relative_path`, creating parent directories.
    pub fn write(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}
