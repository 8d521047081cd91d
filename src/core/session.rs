//! `SkillTree`: the session store.
//!
//! Owns the graph, one user's progress, the focus selection and the edge
//! cache. Every write goes through here so the cached edge variants always
//! reflect current display statuses.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use super::derived::EdgeCache;
use super::edge::EdgeVariant;
use super::filter::{SkillQuery, with_display_status};
use super::focus::FocusState;
use super::graph::SkillGraph;
use super::skill::Skill;
use super::status::{NodeStatus, ProgressStatus};
use super::unlock::{self, StatusLookup};
use crate::error::{Result, SkillTreeError};
use crate::storage::progress::{ProgressBook, ProgressFile, ProgressRecord};

/// One rendered edge.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EdgeView {
    pub parent: String,
    pub child: String,
    pub variant: EdgeVariant,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct SkillTree {
    graph: SkillGraph,
    progress: ProgressBook,
    focus: FocusState,
    edges: EdgeCache,
}

impl SkillTree {
    #[must_use]
    pub fn new(graph: SkillGraph, progress: ProgressBook) -> Self {
        let edges = EdgeCache::from_graph(&graph);
        let mut tree = Self {
            graph,
            progress,
            focus: FocusState::new(),
            edges,
        };
        let all: Vec<String> = tree.graph.skills().iter().map(|s| s.id.clone()).collect();
        tree.refresh(all);
        tree
    }

    #[must_use]
    pub const fn graph(&self) -> &SkillGraph {
        &self.graph
    }

    #[must_use]
    pub const fn progress(&self) -> &ProgressBook {
        &self.progress
    }

    #[must_use]
    pub const fn focus_state(&self) -> &FocusState {
        &self.focus
    }

    /// Edge cache resolver calls so far.
    #[must_use]
    pub const fn edge_evaluations(&self) -> u64 {
        self.edges.evaluations()
    }

    fn skill(&self, skill_id: &str) -> Result<&Skill> {
        self.graph
            .get(skill_id)
            .ok_or_else(|| SkillTreeError::SkillNotFound(skill_id.to_string()))
    }

    #[must_use]
    pub fn display_status(&self, skill_id: &str) -> NodeStatus {
        unlock::display_status(skill_id, &self.graph, Some(&self.progress))
    }

    #[must_use]
    pub fn is_unlocked(&self, skill_id: &str) -> bool {
        unlock::is_unlocked(skill_id, &self.graph, Some(&self.progress))
    }

    pub fn set_status(&mut self, skill_id: &str, status: ProgressStatus) -> Result<ProgressRecord> {
        let total_steps = self.skill(skill_id)?.total_steps();
        let record = self.progress.set_status(skill_id, status, total_steps).clone();
        self.refresh([skill_id.to_string()]);
        Ok(record)
    }

    pub fn advance_step(&mut self, skill_id: &str) -> Result<ProgressRecord> {
        self.skill(skill_id)?;
        Ok(self.progress.advance_step(skill_id).clone())
    }

    pub fn set_step(&mut self, skill_id: &str, step: i32) -> Result<ProgressRecord> {
        self.skill(skill_id)?;
        Ok(self.progress.set_step(skill_id, step).clone())
    }

    pub fn set_note(&mut self, skill_id: &str, note: &str) -> Result<ProgressRecord> {
        self.skill(skill_id)?;
        Ok(self.progress.set_note(skill_id, note).clone())
    }

    pub fn reset(&mut self, skill_id: &str) -> Result<ProgressRecord> {
        self.skill(skill_id)?;
        let record = self.progress.reset(skill_id).clone();
        self.refresh([skill_id.to_string()]);
        Ok(record)
    }

    /// Apply a progress file as one batch. Entries for skills outside the
    /// graph are kept in the book but touch no edge. Returns the changed ids.
    pub fn import(&mut self, file: &ProgressFile) -> Vec<String> {
        let changed = self.progress.import(file);
        self.refresh(changed.iter().cloned());
        changed
    }

    #[must_use]
    pub fn export(&self) -> ProgressFile {
        self.progress.export()
    }

    /// Every edge with its variant, in catalog order.
    pub fn edge_variants(&mut self) -> Vec<EdgeView> {
        let focus = &self.focus;
        self.edges
            .variants()
            .into_iter()
            .map(|(parent, child, variant)| EdgeView {
                highlighted: focus.is_edge_highlighted(&parent, &child),
                parent,
                child,
                variant,
            })
            .collect()
    }

    pub fn edge_variant(&mut self, parent: &str, child: &str) -> Option<EdgeVariant> {
        self.edges.variant(parent, child)
    }

    /// Focus on a skill and return its branch.
    pub fn focus(&mut self, skill_id: &str) -> Result<&HashSet<String>> {
        self.skill(skill_id)?;
        self.focus.set_focus(Some(skill_id), &self.graph);
        Ok(self.focus.branch())
    }

    pub fn clear_focus(&mut self) {
        self.focus.clear();
    }

    #[must_use]
    pub fn is_faded(&self, skill_id: &str) -> bool {
        self.focus.is_faded(skill_id)
    }

    /// Filtered and sorted skills with their display statuses.
    #[must_use]
    pub fn query(&self, query: &SkillQuery) -> Vec<(&Skill, NodeStatus)> {
        let skills = query.run(&self.graph, Some(&self.progress));
        with_display_status(&skills, &self.graph, Some(&self.progress))
    }

    /// Push display statuses of `ids` and their direct dependents into the
    /// edge cache. Display status of a node only depends on its own record
    /// and its prerequisites, so nothing further can change.
    fn refresh<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut touched = BTreeSet::new();
        for id in ids {
            if !self.graph.contains(&id) {
                continue;
            }
            touched.extend(self.graph.dependents_of(&id).map(|s| s.id.clone()));
            touched.insert(id);
        }
        let updates: Vec<(String, NodeStatus)> = touched
            .into_iter()
            .map(|id| {
                let status = self.display_status(&id);
                (id, status)
            })
            .collect();
        let changed = self
            .edges
            .apply_batch(updates.iter().map(|(id, status)| (id.as_str(), *status)));
        debug!(target: "session", touched = updates.len(), changed, "display statuses refreshed");
    }
}

impl StatusLookup for SkillTree {
    fn status_of(&self, skill_id: &str) -> ProgressStatus {
        self.progress.status_of(skill_id)
    }

    fn current_step(&self, skill_id: &str) -> i32 {
        self.progress.current_step(skill_id)
    }
}
