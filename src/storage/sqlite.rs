//! SQLite record store for catalog and per-user progress.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::core::skill::{Category, Skill, SkillType};
use crate::core::status::ProgressStatus;
use crate::error::{Result, SkillTreeError};
use crate::storage::migrations;
use crate::storage::progress::{ProgressBook, ProgressRecord};

/// SQLite database wrapper for the skill catalog and progress.
pub struct Database {
    conn: Connection,
    schema_version: u32,
}

impl Database {
    /// Open database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;
        debug!(target: "storage", path = %path.display(), schema_version, "database opened");

        Ok(Self {
            conn,
            schema_version,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let schema_version = migrations::run_migrations(&conn)?;
        Ok(Self {
            conn,
            schema_version,
        })
    }

    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Current schema version after migrations.
    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }

    pub fn upsert_category(&self, category: &Category) -> Result<()> {
        write_category(&self.conn, category)
    }

    pub fn upsert_skill(&self, skill: &Skill) -> Result<()> {
        write_skill(&self.conn, skill)
    }

    /// Write a whole catalog in one transaction.
    pub fn seed(&self, categories: &[Category], skills: &[Skill]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for category in categories {
            write_category(&tx, category)?;
        }
        for skill in skills {
            write_skill(&tx, skill)?;
        }
        tx.commit()?;
        debug!(target: "storage", categories = categories.len(), skills = skills.len(), "catalog seeded");
        Ok(())
    }

    /// Every skill, in insertion order.
    pub fn read_all(&self) -> Result<Vec<Skill>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, abbr, category_id, sport, difficulty, description,
                    skill_type, progressions, tutorials, requires, mastery_criteria
             FROM skills ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SkillRow {
                id: row.get(0)?,
                name: row.get(1)?,
                abbr: row.get(2)?,
                category_id: row.get(3)?,
                sport: row.get(4)?,
                difficulty: row.get(5)?,
                description: row.get(6)?,
                skill_type: row.get(7)?,
                progressions: row.get(8)?,
                tutorials: row.get(9)?,
                requires: row.get(10)?,
                mastery_criteria: row.get(11)?,
            })
        })?;

        let mut skills = Vec::new();
        for row in rows {
            skills.push(row?.into_skill()?);
        }
        Ok(skills)
    }

    pub fn read_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, description FROM categories ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
                description: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn skill_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM skills", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub fn ensure_user(&self, user_id: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, created_at) VALUES (?1, ?2) ON CONFLICT(id) DO NOTHING",
            params![user_id, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// All progress rows of `user_id` as a book.
    pub fn read_progress(&self, user_id: &str) -> Result<ProgressBook> {
        let mut stmt = self.conn.prepare(
            "SELECT skill_id, status, current_step, note, started_at, mastered_at, updated_at
             FROM user_progress WHERE user_id = ?1",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(ProgressRow {
                skill_id: row.get(0)?,
                status: row.get(1)?,
                current_step: row.get(2)?,
                note: row.get(3)?,
                started_at: row.get(4)?,
                mastered_at: row.get(5)?,
                updated_at: row.get(6)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(ProgressBook::from_records(records))
    }

    pub fn read_record(&self, user_id: &str, skill_id: &str) -> Result<Option<ProgressRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT skill_id, status, current_step, note, started_at, mastered_at, updated_at
                 FROM user_progress WHERE user_id = ?1 AND skill_id = ?2",
                params![user_id, skill_id],
                |row| {
                    Ok(ProgressRow {
                        skill_id: row.get(0)?,
                        status: row.get(1)?,
                        current_step: row.get(2)?,
                        note: row.get(3)?,
                        started_at: row.get(4)?,
                        mastered_at: row.get(5)?,
                        updated_at: row.get(6)?,
                    })
                },
            )
            .optional()?;
        row.map(|row| row.into_record().map(|(_, record)| record))
            .transpose()
    }

    pub fn save_progress(&self, user_id: &str, skill_id: &str, record: &ProgressRecord) -> Result<()> {
        self.ensure_user(user_id)?;
        write_progress(&self.conn, user_id, skill_id, record)
    }

    /// Save every record of `book` for `user_id` in one transaction.
    pub fn save_book(&self, user_id: &str, book: &ProgressBook) -> Result<()> {
        self.ensure_user(user_id)?;
        let tx = self.conn.unchecked_transaction()?;
        for (skill_id, record) in book.records() {
            write_progress(&tx, user_id, skill_id, record)?;
        }
        tx.commit()?;
        debug!(target: "storage", user_id, records = book.len(), "progress saved");
        Ok(())
    }

    /// Overwrite the stored row with a default record stamped now.
    /// Returns whether a row existed before.
    pub fn reset_progress(&self, user_id: &str, skill_id: &str) -> Result<bool> {
        let existed = self.read_record(user_id, skill_id)?.is_some();
        let record = ProgressRecord {
            updated_at: Some(Utc::now()),
            ..ProgressRecord::default()
        };
        self.save_progress(user_id, skill_id, &record)?;
        debug!(target: "storage", user_id, skill_id, existed, "progress reset");
        Ok(existed)
    }
}

fn write_category(conn: &Connection, category: &Category) -> Result<()> {
    conn.execute(
        "INSERT INTO categories (id, name, color, description)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            color = excluded.color,
            description = excluded.description",
        params![category.id, category.name, category.color, category.description],
    )?;
    Ok(())
}

fn write_skill(conn: &Connection, skill: &Skill) -> Result<()> {
    let progressions = serde_json::to_string(&skill.progressions)?;
    let tutorials = skill
        .tutorials
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let requires = serde_json::to_string(&skill.requires)?;
    conn.execute(
        "INSERT INTO skills (id, name, abbr, category_id, sport, difficulty, description,
                             skill_type, progressions, tutorials, requires, mastery_criteria)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            abbr = excluded.abbr,
            category_id = excluded.category_id,
            sport = excluded.sport,
            difficulty = excluded.difficulty,
            description = excluded.description,
            skill_type = excluded.skill_type,
            progressions = excluded.progressions,
            tutorials = excluded.tutorials,
            requires = excluded.requires,
            mastery_criteria = excluded.mastery_criteria",
        params![
            skill.id,
            skill.name,
            skill.abbr,
            skill.category_id,
            skill.sport,
            skill.difficulty,
            skill.description,
            skill.skill_type.as_str(),
            progressions,
            tutorials,
            requires,
            skill.mastery_criteria,
        ],
    )?;
    Ok(())
}

fn write_progress(
    conn: &Connection,
    user_id: &str,
    skill_id: &str,
    record: &ProgressRecord,
) -> Result<()> {
    conn.execute(
        "INSERT INTO user_progress
            (user_id, skill_id, status, current_step, note, started_at, mastered_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(user_id, skill_id) DO UPDATE SET
            status = excluded.status,
            current_step = excluded.current_step,
            note = excluded.note,
            started_at = excluded.started_at,
            mastered_at = excluded.mastered_at,
            updated_at = excluded.updated_at",
        params![
            user_id,
            skill_id,
            record.status.as_str(),
            record.current_step,
            record.note,
            record.started_at.map(|t| t.to_rfc3339()),
            record.mastered_at.map(|t| t.to_rfc3339()),
            record.updated_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(())
}

struct SkillRow {
    id: String,
    name: String,
    abbr: Option<String>,
    category_id: Option<String>,
    sport: String,
    difficulty: u32,
    description: Option<String>,
    skill_type: String,
    progressions: String,
    tutorials: Option<String>,
    requires: String,
    mastery_criteria: Option<String>,
}

impl SkillRow {
    fn into_skill(self) -> Result<Skill> {
        let skill_type: SkillType = self.skill_type.parse().map_err(|_| {
            SkillTreeError::InvalidSkill(format!("{}: unknown type {}", self.id, self.skill_type))
        })?;
        Ok(Skill {
            progressions: serde_json::from_str(&self.progressions)?,
            tutorials: self
                .tutorials
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            requires: serde_json::from_str(&self.requires)?,
            id: self.id,
            name: self.name,
            abbr: self.abbr,
            category_id: self.category_id,
            sport: self.sport,
            difficulty: self.difficulty,
            description: self.description,
            skill_type,
            mastery_criteria: self.mastery_criteria,
        })
    }
}

struct ProgressRow {
    skill_id: String,
    status: String,
    current_step: i32,
    note: String,
    started_at: Option<String>,
    mastered_at: Option<String>,
    updated_at: Option<String>,
}

impl ProgressRow {
    fn into_record(self) -> Result<(String, ProgressRecord)> {
        let record = ProgressRecord {
            status: ProgressStatus::parse_stored(&self.status)?,
            current_step: self.current_step,
            note: self.note,
            started_at: parse_timestamp(self.started_at.as_deref()),
            mastered_at: parse_timestamp(self.mastered_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
        };
        Ok((self.skill_id, record))
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
}
