use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::core::graph::SkillGraph;
use crate::core::session::SkillTree;
use crate::error::{Result, SkillTreeError};
use crate::storage::Database;

pub const ROOT_DIR: &str = ".skilltree";

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub db: Database,
    /// User whose progress commands read and write.
    pub user: String,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let db = Database::open(config.database_path(&root))?;
        let user = cli.user.clone().unwrap_or_else(|| config.user.id.clone());
        let robot_mode = cli.robot || config.robot.enabled;
        let output_format = match cli.format {
            Some(format) => format,
            None if robot_mode => robot_format(&config.robot.format),
            None => OutputFormat::Human,
        };
        debug!(target: "app", root = %root.display(), user, robot_mode, "context ready");

        Ok(Self {
            root,
            config,
            db,
            user,
            robot_mode,
            output_format,
            verbosity: cli.verbose,
        })
    }

    /// Context over an explicit root and database, for tests and embedding.
    pub fn with_parts(root: PathBuf, config: Config, db: Database) -> Self {
        let user = config.user.id.clone();
        Self {
            root,
            config,
            db,
            user,
            robot_mode: false,
            output_format: OutputFormat::Human,
            verbosity: 0,
        }
    }

    /// Session over the stored catalog and this user's progress.
    pub fn load_tree(&self) -> Result<SkillTree> {
        let skills = self.db.read_all()?;
        let progress = self.db.read_progress(&self.user)?;
        debug!(target: "app", skills = skills.len(), records = progress.len(), "tree loaded");
        Ok(SkillTree::new(SkillGraph::new(skills), progress))
    }

    pub fn catalog_dir(&self) -> PathBuf {
        self.config.catalog_dir(&self.root)
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("SKILLTREE_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ROOT_DIR) {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SkillTreeError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("skilltree"))
    }
}

/// Configured robot format; anything unknown or human falls back to JSON.
fn robot_format(configured: &str) -> OutputFormat {
    match OutputFormat::from_str(configured, true) {
        Ok(format) if format.is_machine() => format,
        _ => {
            warn!(target: "app", format = configured, "unusable robot format, using json");
            OutputFormat::Json
        }
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
}
