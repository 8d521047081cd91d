//! Focus branch: the neighbourhood of a selected skill.
//!
//! The branch holds the focused skill, every transitive prerequisite, and the
//! skills that list the focused one directly in `requires`. Dependents of
//! dependents are not part of it.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use super::graph::SkillGraph;

/// Compute the focus branch of `skill_id`.
///
/// Unknown ids yield an empty set. Prerequisite ids that do not resolve to a
/// skill are skipped. The result set doubles as the visited marker, so a
/// cyclic graph terminates.
#[must_use]
pub fn compute_focus_branch(skill_id: &str, graph: &SkillGraph) -> HashSet<String> {
    let mut branch = HashSet::new();
    if !graph.contains(skill_id) {
        debug!(target: "focus", skill_id, "focus on unknown skill");
        return branch;
    }
    branch.insert(skill_id.to_string());

    let mut queue = VecDeque::from([skill_id]);
    while let Some(current) = queue.pop_front() {
        let Some(skill) = graph.get(current) else {
            continue;
        };
        for req in &skill.requires {
            if graph.contains(req) && branch.insert(req.clone()) {
                queue.push_back(req.as_str());
            }
        }
    }

    for skill in graph.skills() {
        if skill.requires.iter().any(|req| req == skill_id) {
            branch.insert(skill.id.clone());
        }
    }

    branch
}

/// Current focus selection and its branch.
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    focused: Option<String>,
    branch: HashSet<String>,
}

impl FocusState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus on `skill_id`, or clear the focus with `None`.
    pub fn set_focus(&mut self, skill_id: Option<&str>, graph: &SkillGraph) {
        match skill_id {
            Some(id) => {
                self.branch = compute_focus_branch(id, graph);
                self.focused = Some(id.to_string());
                debug!(target: "focus", skill_id = id, size = self.branch.len(), "focus set");
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.focused = None;
        self.branch.clear();
    }

    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    #[must_use]
    pub const fn branch(&self) -> &HashSet<String> {
        &self.branch
    }

    #[must_use]
    pub fn is_in_focus_branch(&self, skill_id: &str) -> bool {
        self.branch.contains(skill_id)
    }

    /// A node is faded while some focus is active and it lies outside it.
    #[must_use]
    pub fn is_faded(&self, skill_id: &str) -> bool {
        self.focused.is_some() && !self.branch.contains(skill_id)
    }

    /// An edge is highlighted when both endpoints are in the branch.
    #[must_use]
    pub fn is_edge_highlighted(&self, parent: &str, child: &str) -> bool {
        self.branch.contains(parent) && self.branch.contains(child)
    }
}
