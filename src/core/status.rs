//! Progress states and their order of advancement.
//!
//! Two enums live here. [`ProgressStatus`] is what gets stored per user and
//! skill. [`NodeStatus`] is what gets displayed: it adds the derived
//! `unlocked` state ("stored locked, but every prerequisite is satisfied"),
//! which is never written anywhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillTreeError};

/// Stored progress status for a (user, skill) pair.
///
/// Older progress files stored the terminal state as `unlocked`; on read it
/// migrates to [`ProgressStatus::Completed`] and is never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    Locked,
    InProgress,
    #[serde(alias = "unlocked")]
    Completed,
    Mastered,
}

impl ProgressStatus {
    pub const ALL: [Self; 4] = [Self::Locked, Self::InProgress, Self::Completed, Self::Mastered];

    /// Whether this status satisfies a prerequisite.
    #[must_use]
    pub const fn is_satisfied(self) -> bool {
        matches!(self, Self::Completed | Self::Mastered)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Mastered => "mastered",
        }
    }

    /// Parse a stored value, accepting the legacy `unlocked` terminal state.
    pub fn parse_stored(value: &str) -> Result<Self> {
        match value {
            "unlocked" => Ok(Self::Completed),
            other => other.parse(),
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = SkillTreeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "locked" => Ok(Self::Locked),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" | "complete" => Ok(Self::Completed),
            "mastered" => Ok(Self::Mastered),
            _ => Err(SkillTreeError::InvalidStatus(format!(
                "{value} (expected locked|in_progress|completed|mastered)"
            ))),
        }
    }
}

/// Display status of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Locked,
    Unlocked,
    InProgress,
    Completed,
    Mastered,
}

impl NodeStatus {
    pub const ALL: [Self; 5] = [
        Self::Locked,
        Self::Unlocked,
        Self::InProgress,
        Self::Completed,
        Self::Mastered,
    ];

    /// Sort priority: higher values are more advanced and sort first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Mastered => 5,
            Self::Completed => 4,
            Self::InProgress => 3,
            Self::Unlocked => 2,
            Self::Locked => 1,
        }
    }

    /// Combine a stored status with the unlock predicate's answer.
    #[must_use]
    pub const fn derive(stored: ProgressStatus, unlocked: bool) -> Self {
        match stored {
            ProgressStatus::Locked if unlocked => Self::Unlocked,
            ProgressStatus::Locked => Self::Locked,
            ProgressStatus::InProgress => Self::InProgress,
            ProgressStatus::Completed => Self::Completed,
            ProgressStatus::Mastered => Self::Mastered,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Mastered => "mastered",
        }
    }
}

impl From<ProgressStatus> for NodeStatus {
    fn from(status: ProgressStatus) -> Self {
        Self::derive(status, false)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
