//! Skill collection filter.
//!
//! Four independent dimensions (sport, type, category, status). An empty
//! dimension places no restriction. Values within one dimension are OR-ed,
//! dimensions are AND-ed. The filter is a view: it borrows skills from the
//! graph and never touches progress.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::graph::SkillGraph;
use super::skill::{Skill, SkillType};
use super::sort::{
    ListSortBy, SortDirection, compare_by_difficulty, compare_by_progress, compare_by_status,
    progress_fill,
};
use super::status::{NodeStatus, ProgressStatus};
use super::unlock::{StatusLookup, display_status, is_unlocked};
use crate::error::{Result, SkillTreeError};

/// A status filter value: a stored status, or the derived `unlocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    Stored(ProgressStatus),
    Unlocked,
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored(status) => fmt::Display::fmt(status, f),
            Self::Unlocked => f.write_str("unlocked"),
        }
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = SkillTreeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for StatusFilter {
    type Err = SkillTreeError;

    fn from_str(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("unlocked") {
            return Ok(Self::Unlocked);
        }
        value.parse().map(Self::Stored)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillFilters {
    #[serde(default)]
    pub sport: BTreeSet<String>,
    #[serde(default, rename = "type")]
    pub skill_type: BTreeSet<SkillType>,
    #[serde(default)]
    pub category: BTreeSet<String>,
    #[serde(default)]
    pub status: BTreeSet<StatusFilter>,
}

impl SkillFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sport.is_empty()
            && self.skill_type.is_empty()
            && self.category.is_empty()
            && self.status.is_empty()
    }

    /// Whether `skill` passes every dimension.
    #[must_use]
    pub fn matches(
        &self,
        skill: &Skill,
        graph: &SkillGraph,
        lookup: Option<&dyn StatusLookup>,
    ) -> bool {
        if !self.sport.is_empty() && !self.sport.contains(&skill.sport) {
            return false;
        }
        if !self.skill_type.is_empty() && !self.skill_type.contains(&skill.skill_type) {
            return false;
        }
        if !self.category.is_empty() {
            let Some(category) = skill.category_id.as_ref() else {
                return false;
            };
            if !self.category.contains(category) {
                return false;
            }
        }
        if !self.status.is_empty() {
            let stored = lookup.map_or(ProgressStatus::Locked, |l| l.status_of(&skill.id));
            let matched = self.status.iter().any(|wanted| match wanted {
                StatusFilter::Stored(status) => *status == stored,
                StatusFilter::Unlocked => {
                    stored == ProgressStatus::Locked && is_unlocked(&skill.id, graph, lookup)
                }
            });
            if !matched {
                return false;
            }
        }
        true
    }
}

/// Skills passing `filters`, in catalog order.
#[must_use]
pub fn filtered_skills<'g>(
    graph: &'g SkillGraph,
    filters: &SkillFilters,
    lookup: Option<&dyn StatusLookup>,
) -> Vec<&'g Skill> {
    graph
        .skills()
        .iter()
        .filter(|skill| filters.matches(skill, graph, lookup))
        .collect()
}

/// Stable secondary sort; ties keep their relative input order.
pub fn sort_skills(
    skills: &mut [&Skill],
    sort: ListSortBy,
    graph: &SkillGraph,
    lookup: Option<&dyn StatusLookup>,
) {
    match sort {
        ListSortBy::Default => {}
        ListSortBy::DifficultyAsc => skills
            .sort_by(|a, b| compare_by_difficulty(a.difficulty, b.difficulty, SortDirection::Asc)),
        ListSortBy::DifficultyDesc => skills
            .sort_by(|a, b| compare_by_difficulty(a.difficulty, b.difficulty, SortDirection::Desc)),
        ListSortBy::Status => {
            let priority = |skill: &Skill| display_status(&skill.id, graph, lookup).priority();
            skills.sort_by(|a, b| compare_by_status(priority(*a), priority(*b)));
        }
        ListSortBy::Progress => {
            let fill = |skill: &Skill| -> f64 {
                lookup.map_or(0.0, |l| {
                    progress_fill(l.status_of(&skill.id), skill.total_steps(), l.current_step(&skill.id))
                })
            };
            skills.sort_by(|a, b| compare_by_progress(fill(*a), fill(*b)));
        }
    }
}

/// Filter plus sort, as one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillQuery {
    #[serde(default)]
    pub filters: SkillFilters,
    #[serde(default)]
    pub sort: ListSortBy,
}

impl SkillQuery {
    #[must_use]
    pub fn run<'g>(&self, graph: &'g SkillGraph, lookup: Option<&dyn StatusLookup>) -> Vec<&'g Skill> {
        let mut skills = filtered_skills(graph, &self.filters, lookup);
        sort_skills(&mut skills, self.sort, graph, lookup);
        skills
    }
}

/// Display status of every skill in `skills`, for rendering lists.
#[must_use]
pub fn with_display_status<'g>(
    skills: &[&'g Skill],
    graph: &SkillGraph,
    lookup: Option<&dyn StatusLookup>,
) -> Vec<(&'g Skill, NodeStatus)> {
    skills
        .iter()
        .map(|skill| (*skill, display_status(&skill.id, graph, lookup)))
        .collect()
}
