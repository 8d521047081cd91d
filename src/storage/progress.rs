//! In-memory progress book and the JSON progress file format.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::status::ProgressStatus;
use crate::core::unlock::StatusLookup;

pub const PROGRESS_FILE_VERSION: &str = "1.0";

/// Progress of one user on one skill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub status: ProgressStatus,
    /// Index of the next incomplete progression step.
    #[serde(default)]
    pub current_step: i32,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of a progress file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub status: ProgressStatus,
    #[serde(default)]
    pub current_step: i32,
    #[serde(default)]
    pub note: String,
}

/// Versioned progress export: `{version, updated, skills: {id: entry}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressFile {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: BTreeMap<String, ProgressEntry>,
}

impl Default for ProgressFile {
    fn default() -> Self {
        Self {
            version: PROGRESS_FILE_VERSION.to_string(),
            updated: None,
            skills: BTreeMap::new(),
        }
    }
}

/// Progress records keyed by skill id for a single user.
///
/// Absent skills read as defaults (`locked`, step 0, no note). Records are
/// never removed, only reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBook {
    records: BTreeMap<String, ProgressRecord>,
}

impl ProgressBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, ProgressRecord)>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get_progress(&self, skill_id: &str) -> ProgressRecord {
        self.records.get(skill_id).cloned().unwrap_or_default()
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &ProgressRecord)> {
        self.records.iter().map(|(id, record)| (id.as_str(), record))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Change the status of a skill with `total_steps` progression steps.
    ///
    /// `completed`/`mastered` mark every step done, `locked` rewinds to step
    /// 0, `in_progress` keeps the current step. The note is kept.
    pub fn set_status(
        &mut self,
        skill_id: &str,
        status: ProgressStatus,
        total_steps: usize,
    ) -> &ProgressRecord {
        let now = Utc::now();
        let record = self.entry(skill_id);
        record.status = status;
        match status {
            ProgressStatus::Completed | ProgressStatus::Mastered => {
                record.current_step = i32::try_from(total_steps).unwrap_or(i32::MAX);
            }
            ProgressStatus::Locked => record.current_step = 0,
            ProgressStatus::InProgress => {}
        }
        if status != ProgressStatus::Locked && record.started_at.is_none() {
            record.started_at = Some(now);
        }
        if status == ProgressStatus::Mastered {
            record.mastered_at.get_or_insert(now);
        }
        record.updated_at = Some(now);
        debug!(target: "progress", skill_id, %status, step = record.current_step, "status set");
        record
    }

    pub fn advance_step(&mut self, skill_id: &str) -> &ProgressRecord {
        let record = self.entry(skill_id);
        record.current_step = record.current_step.saturating_add(1);
        record.updated_at = Some(Utc::now());
        record
    }

    pub fn set_step(&mut self, skill_id: &str, step: i32) -> &ProgressRecord {
        let record = self.entry(skill_id);
        record.current_step = step.max(-1);
        record.updated_at = Some(Utc::now());
        record
    }

    pub fn set_note(&mut self, skill_id: &str, note: impl Into<String>) -> &ProgressRecord {
        let record = self.entry(skill_id);
        record.note = note.into();
        record.updated_at = Some(Utc::now());
        record
    }

    /// Back to defaults; the record itself stays.
    pub fn reset(&mut self, skill_id: &str) -> &ProgressRecord {
        let record = self.entry(skill_id);
        *record = ProgressRecord {
            updated_at: Some(Utc::now()),
            ..ProgressRecord::default()
        };
        record
    }

    /// Snapshot as a progress file.
    #[must_use]
    pub fn export(&self) -> ProgressFile {
        ProgressFile {
            version: PROGRESS_FILE_VERSION.to_string(),
            updated: Some(Utc::now()),
            skills: self
                .records
                .iter()
                .map(|(id, record)| {
                    (
                        id.clone(),
                        ProgressEntry {
                            status: record.status,
                            current_step: record.current_step,
                            note: record.note.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Apply a progress file. Each entry overwrites status, step and note of
    /// its skill, so applying the same file twice, or its entries in any
    /// order, ends in the same state. Returns the ids whose values changed.
    pub fn import(&mut self, file: &ProgressFile) -> Vec<String> {
        let mut changed = Vec::new();
        for (skill_id, entry) in &file.skills {
            if self.apply_entry(skill_id, entry) {
                changed.push(skill_id.clone());
            }
        }
        debug!(target: "progress", entries = file.skills.len(), changed = changed.len(), "progress imported");
        changed
    }

    /// Overwrite one record from a file entry. Returns whether it changed.
    pub fn apply_entry(&mut self, skill_id: &str, entry: &ProgressEntry) -> bool {
        let current = self.get_progress(skill_id);
        if current.status == entry.status
            && current.current_step == entry.current_step
            && current.note == entry.note
        {
            return false;
        }
        let now = Utc::now();
        let record = self.entry(skill_id);
        record.status = entry.status;
        record.current_step = entry.current_step;
        record.note.clone_from(&entry.note);
        if entry.status != ProgressStatus::Locked && record.started_at.is_none() {
            record.started_at = Some(now);
        }
        if entry.status == ProgressStatus::Mastered && record.mastered_at.is_none() {
            record.mastered_at = Some(now);
        }
        record.updated_at = Some(now);
        true
    }

    fn entry(&mut self, skill_id: &str) -> &mut ProgressRecord {
        self.records.entry(skill_id.to_string()).or_default()
    }
}

impl StatusLookup for ProgressBook {
    fn status_of(&self, skill_id: &str) -> ProgressStatus {
        self.records
            .get(skill_id)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    fn current_step(&self, skill_id: &str) -> i32 {
        self.records
            .get(skill_id)
            .map_or(0, |record| record.current_step)
    }
}
