//! Skill tree engine: statuses, graph, edges, unlocks, focus, filters.

pub mod derived;
pub mod edge;
pub mod filter;
pub mod focus;
pub mod graph;
pub mod session;
pub mod skill;
pub mod sort;
pub mod status;
pub mod unlock;

pub use derived::EdgeCache;
pub use edge::{EdgeVariant, resolve_edge_variant};
pub use filter::{SkillFilters, SkillQuery, StatusFilter, filtered_skills, sort_skills};
pub use focus::{FocusState, compute_focus_branch};
pub use graph::{DanglingReference, GraphReport, SkillGraph};
pub use session::{EdgeView, SkillTree};
pub use skill::{Category, Progression, Skill, SkillType, Tutorials};
pub use sort::{ListSortBy, SortDirection, progress_fill};
pub use status::{NodeStatus, ProgressStatus};
pub use unlock::{StatusLookup, display_status, is_unlocked};
