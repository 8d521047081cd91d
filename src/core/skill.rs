//! Skill and category records as loaded from the catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SkillTreeError};

/// Whether a node is a standalone skill or a transition between skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[default]
    Skill,
    Transition,
}

impl SkillType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillType {
    type Err = SkillTreeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "skill" => Ok(Self::Skill),
            "transition" => Ok(Self::Transition),
            _ => Err(SkillTreeError::InvalidSkill(format!(
                "invalid skill type {value} (expected skill|transition)"
            ))),
        }
    }
}

/// One step on the way to a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub name: String,
    #[serde(default)]
    pub mastery_criteria: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tutorials {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default, alias = "category")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub difficulty: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub skill_type: SkillType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub progressions: Vec<Progression>,
    #[serde(default)]
    pub tutorials: Option<Tutorials>,
    /// Prerequisite skill ids. `null` and absent both mean "no prerequisites".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requires: Vec<String>,
    #[serde(default)]
    pub mastery_criteria: Option<String>,
}

impl Skill {
    pub fn new(id: impl Into<String>, sport: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            abbr: None,
            category_id: None,
            sport: sport.into(),
            difficulty: 1,
            description: None,
            skill_type: SkillType::Skill,
            progressions: Vec::new(),
            tutorials: None,
            requires: Vec::new(),
            mastery_criteria: None,
        }
    }

    #[must_use]
    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_type(mut self, skill_type: SkillType) -> Self {
        self.skill_type = skill_type;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, count: usize) -> Self {
        self.progressions = (1..=count)
            .map(|idx| Progression {
                name: format!("step {idx}"),
                mastery_criteria: None,
            })
            .collect();
        self
    }

    /// Number of progression steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.progressions.len()
    }

    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.requires.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
