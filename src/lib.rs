//! skilltree - prerequisite graph engine for sport skill trees
//!
//! The [`core`] module holds the pure graph engine: unlock rules, display
//! statuses, edge variants, focus branches, filtering and sorting. The
//! [`storage`] module loads YAML catalogs and persists progress in SQLite,
//! and [`cli`] wires both into the `skilltree` binary.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod test_utils;

pub use error::{Result, SkillTreeError};
