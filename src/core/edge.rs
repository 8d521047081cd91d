//! Edge variant resolution.
//!
//! Every prerequisite edge (parent -> child) is drawn according to the
//! statuses of its two endpoints. The mapping is a total function over the
//! 5x5 [`NodeStatus`] product; rules are checked in order and the first
//! match wins.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::status::NodeStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeVariant {
    /// Prerequisite chain broken upstream.
    LockedDashed,
    /// Parent reachable, child not started.
    LockedSolid,
    /// Child is ready to start.
    Available,
    InProgress,
    Completed,
    Mastered,
    MasteredToCompleted,
}

impl EdgeVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LockedDashed => "locked_dashed",
            Self::LockedSolid => "locked_solid",
            Self::Available => "available",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Mastered => "mastered",
            Self::MasteredToCompleted => "mastered_to_completed",
        }
    }

    #[must_use]
    pub const fn is_dashed(self) -> bool {
        matches!(self, Self::LockedDashed)
    }
}

impl fmt::Display for EdgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the edge `parent -> child`.
#[must_use]
pub const fn resolve_edge_variant(parent: NodeStatus, child: NodeStatus) -> EdgeVariant {
    use NodeStatus as S;

    match (parent, child) {
        (S::Locked, _) => EdgeVariant::LockedDashed,
        (_, S::Locked) => EdgeVariant::LockedSolid,
        (_, S::Unlocked) => EdgeVariant::Available,
        (S::Mastered, S::Mastered) => EdgeVariant::Mastered,
        (S::Mastered, S::Completed) => EdgeVariant::MasteredToCompleted,
        (S::Completed, S::Completed) => EdgeVariant::Completed,
        _ => EdgeVariant::InProgress,
    }
}
