//! Per-edge memoisation of edge variants.
//!
//! One status cell per node, one cached variant per edge. Writing a cell
//! dirties only the edges incident to that node, and only when the value
//! actually changes. Reads recompute dirty edges and nothing else, so a
//! single status change in a chain costs at most two resolver calls and a
//! batch over the whole chain costs one call per edge.

use std::collections::HashMap;

use tracing::trace;

use super::edge::{EdgeVariant, resolve_edge_variant};
use super::graph::SkillGraph;
use super::status::NodeStatus;

#[derive(Debug, Clone)]
struct CachedEdge {
    parent: String,
    child: String,
    value: Option<EdgeVariant>,
}

#[derive(Debug, Clone, Default)]
pub struct EdgeCache {
    cells: HashMap<String, NodeStatus>,
    edges: Vec<CachedEdge>,
    edge_index: HashMap<(String, String), usize>,
    incident: HashMap<String, Vec<usize>>,
    evaluations: u64,
}

impl EdgeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache over every resolvable prerequisite edge of `graph`.
    #[must_use]
    pub fn from_graph(graph: &SkillGraph) -> Self {
        let mut cache = Self::new();
        for (parent, child) in graph.edges() {
            cache.add_edge(parent, child);
        }
        cache
    }

    /// Register `parent -> child`. Re-adding an edge is a no-op.
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        let key = (parent.to_string(), child.to_string());
        if self.edge_index.contains_key(&key) {
            return;
        }
        let idx = self.edges.len();
        self.edges.push(CachedEdge {
            parent: key.0.clone(),
            child: key.1.clone(),
            value: None,
        });
        self.edge_index.insert(key, idx);
        self.incident.entry(parent.to_string()).or_default().push(idx);
        if parent != child {
            self.incident.entry(child.to_string()).or_default().push(idx);
        }
    }

    /// Current cell value; nodes never written read as `locked`.
    #[must_use]
    pub fn status(&self, node: &str) -> NodeStatus {
        self.cells.get(node).copied().unwrap_or(NodeStatus::Locked)
    }

    /// Write a cell. Returns whether the value changed.
    pub fn set_status(&mut self, node: &str, status: NodeStatus) -> bool {
        let previous = self
            .cells
            .insert(node.to_string(), status)
            .unwrap_or(NodeStatus::Locked);
        if previous == status {
            return false;
        }
        if let Some(edges) = self.incident.get(node) {
            for &idx in edges {
                self.edges[idx].value = None;
            }
            trace!(target: "edges", node, dirty = edges.len(), "status cell changed");
        }
        true
    }

    /// Write many cells; each affected edge is recomputed once on next read.
    pub fn apply_batch<'a, I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, NodeStatus)>,
    {
        updates
            .into_iter()
            .filter(|(node, status)| self.set_status(node, *status))
            .count()
    }

    /// Variant of `parent -> child`, recomputed only if dirty.
    pub fn variant(&mut self, parent: &str, child: &str) -> Option<EdgeVariant> {
        let idx = *self
            .edge_index
            .get(&(parent.to_string(), child.to_string()))?;
        Some(self.resolve(idx))
    }

    /// Every edge with its variant, in registration order.
    pub fn variants(&mut self) -> Vec<(String, String, EdgeVariant)> {
        (0..self.edges.len())
            .map(|idx| {
                let variant = self.resolve(idx);
                let edge = &self.edges[idx];
                (edge.parent.clone(), edge.child.clone(), variant)
            })
            .collect()
    }

    /// Number of resolver calls so far.
    #[must_use]
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn resolve(&mut self, idx: usize) -> EdgeVariant {
        if let Some(value) = self.edges[idx].value {
            return value;
        }
        let parent = self.status(&self.edges[idx].parent);
        let child = self.status(&self.edges[idx].child);
        let value = resolve_edge_variant(parent, child);
        self.evaluations += 1;
        self.edges[idx].value = Some(value);
        value
    }
}
