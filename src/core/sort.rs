//! List ordering: comparators and progress fill.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::status::ProgressStatus;
use crate::error::{Result, SkillTreeError};

/// Secondary ordering for skill lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListSortBy {
    /// Catalog order.
    #[default]
    Default,
    DifficultyAsc,
    DifficultyDesc,
    Status,
    Progress,
}

impl ListSortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DifficultyAsc => "difficulty-asc",
            Self::DifficultyDesc => "difficulty-desc",
            Self::Status => "status",
            Self::Progress => "progress",
        }
    }
}

impl fmt::Display for ListSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListSortBy {
    type Err = SkillTreeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().replace('_', "-").as_str() {
            "default" => Ok(Self::Default),
            "difficulty-asc" | "difficulty" => Ok(Self::DifficultyAsc),
            "difficulty-desc" => Ok(Self::DifficultyDesc),
            "status" => Ok(Self::Status),
            "progress" => Ok(Self::Progress),
            _ => Err(SkillTreeError::Config(format!(
                "invalid sort {value} (expected default|difficulty-asc|difficulty-desc|status|progress)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Higher priority sorts first.
#[must_use]
pub fn compare_by_status(a_priority: u8, b_priority: u8) -> Ordering {
    b_priority.cmp(&a_priority)
}

#[must_use]
pub fn compare_by_difficulty(a: u32, b: u32, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => a.cmp(&b),
        SortDirection::Desc => b.cmp(&a),
    }
}

/// Most progressed first.
#[must_use]
pub fn compare_by_progress(a_fill: f64, b_fill: f64) -> Ordering {
    b_fill.total_cmp(&a_fill)
}

/// Fill percentage (0..=100) of a skill's progress bar.
///
/// Without progression steps the bar is full for `completed`/`mastered` and
/// empty otherwise. Negative steps count as zero.
#[must_use]
pub fn progress_fill(status: ProgressStatus, total_steps: usize, current_step: i32) -> f64 {
    if total_steps == 0 {
        return if status.is_satisfied() { 100.0 } else { 0.0 };
    }
    let step = f64::from(current_step.max(0));
    #[allow(clippy::cast_precision_loss)]
    let total = total_steps as f64;
    (step / total * 100.0).min(100.0)
}
