//! Unlock predicate and status lookups.

use std::collections::HashMap;

use tracing::trace;

use super::graph::SkillGraph;
use super::status::{NodeStatus, ProgressStatus};

/// Source of stored statuses. Absent entries read as `locked`, step 0.
pub trait StatusLookup {
    fn status_of(&self, skill_id: &str) -> ProgressStatus;

    /// Index of the next incomplete progression step.
    fn current_step(&self, _skill_id: &str) -> i32 {
        0
    }
}

impl<F> StatusLookup for F
where
    F: Fn(&str) -> ProgressStatus,
{
    fn status_of(&self, skill_id: &str) -> ProgressStatus {
        self(skill_id)
    }
}

impl StatusLookup for HashMap<String, ProgressStatus> {
    fn status_of(&self, skill_id: &str) -> ProgressStatus {
        self.get(skill_id).copied().unwrap_or_default()
    }
}

/// Whether `skill_id` is reachable.
///
/// Fails closed: an unknown id or a missing lookup answers `false`. A skill
/// with no prerequisites is unlocked; otherwise every prerequisite must be
/// `completed` or `mastered`. There is no partial credit.
#[must_use]
pub fn is_unlocked(
    skill_id: &str,
    graph: &SkillGraph,
    lookup: Option<&dyn StatusLookup>,
) -> bool {
    let Some(skill) = graph.get(skill_id) else {
        trace!(target: "unlock", skill_id, "unknown skill");
        return false;
    };
    let Some(lookup) = lookup else {
        trace!(target: "unlock", skill_id, "no status source");
        return false;
    };
    skill
        .requires
        .iter()
        .all(|req| lookup.status_of(req).is_satisfied())
}

/// Display status of a skill: stored status, with `locked` upgraded to
/// `unlocked` when every prerequisite is satisfied.
#[must_use]
pub fn display_status(
    skill_id: &str,
    graph: &SkillGraph,
    lookup: Option<&dyn StatusLookup>,
) -> NodeStatus {
    let stored = lookup.map_or(ProgressStatus::Locked, |l| l.status_of(skill_id));
    let unlocked = stored == ProgressStatus::Locked && is_unlocked(skill_id, graph, lookup);
    NodeStatus::derive(stored, unlocked)
}
