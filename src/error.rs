//! Error types for skilltree

use thiserror::Error;

/// Errors raised by the shell around the graph engine.
///
/// The engine itself (`crate::core`) never fails: unknown ids and missing
/// status sources are encoded as default return values.
#[derive(Debug, Error)]
pub enum SkillTreeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("skill not found: {0}")]
    SkillNotFound(String),

    #[error("invalid skill: {0}")]
    InvalidSkill(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl SkillTreeError {
    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Database(_) => "database_error",
            Self::Config(_) => "config_error",
            Self::MissingConfig(_) => "missing_config",
            Self::Serialization(_) => "serialization_error",
            Self::SkillNotFound(_) => "skill_not_found",
            Self::InvalidSkill(_) => "invalid_skill",
            Self::InvalidStatus(_) => "invalid_status",
            Self::ValidationFailed(_) => "validation_failed",
        }
    }
}

impl From<serde_json::Error> for SkillTreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for SkillTreeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SkillTreeError>;
