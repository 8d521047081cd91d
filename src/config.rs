use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::sort::ListSortBy;
use crate::error::{Result, SkillTreeError};

pub const DEFAULT_USER: &str = "local";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path (argument or `SKILLTREE_CONFIG`) replaces the global
    /// and project files. Otherwise `~/.config/skilltree/config.toml` is
    /// applied, then `<root>/config.toml`. `SKILLTREE_*` variables win last.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLTREE_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&root.join("config.toml"))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a TOML document and layer it over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|err| SkillTreeError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    /// Catalog directory, relative entries resolved against `root`.
    #[must_use]
    pub fn catalog_dir(&self, root: &Path) -> PathBuf {
        resolve(root, self.paths.catalog.as_deref(), "catalog")
    }

    #[must_use]
    pub fn database_path(&self, root: &Path) -> PathBuf {
        resolve(root, self.paths.database.as_deref(), "skilltree.db")
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| SkillTreeError::MissingConfig("config directory not found".to_string()))?
            .join("skilltree/config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            SkillTreeError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            SkillTreeError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.user {
            self.user.merge(patch);
        }
        if let Some(patch) = patch.view {
            self.view.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(&|key| std::env::var(key).ok())
    }

    /// Apply `SKILLTREE_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        let env = EnvReader { lookup };

        if let Some(value) = env.bool("SKILLTREE_ROBOT") {
            self.robot.enabled = value;
        }

        if let Some(value) = env.string("SKILLTREE_CATALOG") {
            self.paths.catalog = Some(PathBuf::from(value));
        }
        if let Some(value) = env.string("SKILLTREE_DB") {
            self.paths.database = Some(PathBuf::from(value));
        }

        if let Some(value) = env.string("SKILLTREE_USER") {
            self.user.id = value;
        }

        if let Some(value) = env.string("SKILLTREE_VIEW_SORT") {
            self.view.default_sort = value.parse()?;
        }
        if let Some(values) = env.list("SKILLTREE_VIEW_SPORTS") {
            self.view.sports = merge_unique(values, &self.view.sports);
        }

        if let Some(value) = env.string("SKILLTREE_ROBOT_FORMAT") {
            self.robot.format = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Catalog directory; defaults to `<root>/catalog`.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// SQLite file; defaults to `<root>/skilltree.db`.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.catalog {
            self.catalog = Some(value);
        }
        if let Some(value) = patch.database {
            self.database = Some(value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user")]
    pub id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { id: default_user() }
    }
}

impl UserConfig {
    fn merge(&mut self, patch: UserPatch) {
        if let Some(value) = patch.id {
            self.id = value;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub default_sort: ListSortBy,
    /// Sports shown when `list` gets no `--sport`.
    #[serde(default)]
    pub sports: Vec<String>,
}

impl ViewConfig {
    fn merge(&mut self, patch: ViewPatch) {
        if let Some(value) = patch.default_sort {
            self.default_sort = value;
        }
        if let Some(values) = patch.sports {
            self.sports = merge_unique(values, &self.sports);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Robot mode without `--robot`.
    #[serde(default)]
    pub enabled: bool,
    /// Output format used in robot mode when `--format` is absent.
    #[serde(default = "default_robot_format")]
    pub format: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            format: default_robot_format(),
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub user: Option<UserPatch>,
    pub view: Option<ViewPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub catalog: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UserPatch {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ViewPatch {
    pub default_sort: Option<ListSortBy>,
    pub sports: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub enabled: Option<bool>,
    pub format: Option<String>,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_robot_format() -> String {
    "json".to_string()
}

fn resolve(root: &Path, configured: Option<&Path>, fallback: &str) -> PathBuf {
    match configured {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => root.join(fallback),
    }
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.into_iter().chain(existing.iter().cloned()) {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvReader<'_> {
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn bool(&self, key: &str) -> Option<bool> {
        (self.lookup)(key).map(|value| {
            matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
        })
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        (self.lookup)(key).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToString::to_string)
                .collect()
        })
    }
}
