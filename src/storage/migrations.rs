//! Schema migrations keyed on `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 1;

const MIGRATIONS: &[(u32, &str)] = &[(
    1,
    r"
    CREATE TABLE IF NOT EXISTS categories (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        color       TEXT NOT NULL,
        description TEXT
    );

    CREATE TABLE IF NOT EXISTS skills (
        id               TEXT PRIMARY KEY,
        name             TEXT NOT NULL,
        abbr             TEXT,
        category_id      TEXT,
        sport            TEXT NOT NULL,
        difficulty       INTEGER NOT NULL DEFAULT 1,
        description      TEXT,
        skill_type       TEXT NOT NULL DEFAULT 'skill',
        progressions     TEXT NOT NULL DEFAULT '[]',
        tutorials        TEXT,
        requires         TEXT NOT NULL DEFAULT '[]',
        mastery_criteria TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_skills_sport ON skills(sport);

    CREATE TABLE IF NOT EXISTS users (
        id         TEXT PRIMARY KEY,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS user_progress (
        user_id      TEXT NOT NULL REFERENCES users(id),
        skill_id     TEXT NOT NULL,
        status       TEXT NOT NULL DEFAULT 'locked',
        current_step INTEGER NOT NULL DEFAULT 0,
        note         TEXT NOT NULL DEFAULT '',
        started_at   TEXT,
        mastered_at  TEXT,
        updated_at   TEXT,
        PRIMARY KEY (user_id, skill_id)
    );
    ",
)];

/// Bring the schema up to [`SCHEMA_VERSION`]. Returns the resulting version.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    let mut version: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    for (target, sql) in MIGRATIONS {
        if *target <= version {
            continue;
        }
        conn.execute_batch(&format!(
            "BEGIN;\n{sql}\nPRAGMA user_version = {target};\nCOMMIT;"
        ))?;
        info!(target: "storage", from = version, to = target, "schema migrated");
        version = *target;
    }
    Ok(version)
}
