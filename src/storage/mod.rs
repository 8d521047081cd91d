//! Storage layer: YAML catalog on disk, SQLite records, progress book.

pub mod catalog;
pub mod migrations;
pub mod progress;
pub mod sqlite;

pub use catalog::{Catalog, load_catalog};
pub use progress::{ProgressBook, ProgressEntry, ProgressFile, ProgressRecord};
pub use sqlite::Database;
