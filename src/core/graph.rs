//! Skill graph index.
//!
//! An arena of skills plus an id index and a dependents adjacency list, built
//! once per snapshot. Queries never mutate the graph; status lives elsewhere.
//!
//! Acyclicity is a precondition that is documented, not enforced. Consumers
//! that traverse the graph (focus branch) are cycle-safe by construction, and
//! [`SkillGraph::validate`] is the optional load-time check.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::skill::Skill;

#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    skills: Vec<Skill>,
    index: HashMap<String, usize>,
    dependents: Vec<Vec<usize>>,
}

impl SkillGraph {
    /// Build the index. On duplicate ids the first occurrence wins; later
    /// duplicates stay in the arena and show up in [`Self::validate`].
    #[must_use]
    pub fn new(skills: Vec<Skill>) -> Self {
        let mut index = HashMap::with_capacity(skills.len());
        for (idx, skill) in skills.iter().enumerate() {
            index.entry(skill.id.clone()).or_insert(idx);
        }

        let mut dependents = vec![Vec::new(); skills.len()];
        for (idx, skill) in skills.iter().enumerate() {
            if index.get(&skill.id) != Some(&idx) {
                continue;
            }
            let mut seen = HashSet::new();
            for req in &skill.requires {
                if !seen.insert(req.as_str()) {
                    continue;
                }
                if let Some(&parent) = index.get(req) {
                    if parent != idx {
                        dependents[parent].push(idx);
                    }
                }
            }
        }

        Self {
            skills,
            index,
            dependents,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.index.get(id).map(|&idx| &self.skills[idx])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Skills in load order (duplicates included).
    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills listing `id` directly in `requires` (one hop).
    pub fn dependents_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Skill> + use<'a> {
        self.index
            .get(id)
            .map(|&idx| self.dependents[idx].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&child| &self.skills[child])
    }

    /// Resolvable prerequisite edges as `(parent, child)` id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.dependents
            .iter()
            .enumerate()
            .flat_map(move |(parent, children)| {
                children.iter().map(move |&child| {
                    (self.skills[parent].id.as_str(), self.skills[child].id.as_str())
                })
            })
    }

    /// One-pass structural check: duplicates, self loops, dangling
    /// references and cycles.
    #[must_use]
    pub fn validate(&self) -> GraphReport {
        let mut report = GraphReport::default();

        let mut seen = HashSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.id.as_str()) {
                report.duplicate_ids.push(skill.id.clone());
            }
        }

        for (idx, skill) in self.skills.iter().enumerate() {
            if self.index.get(&skill.id) != Some(&idx) {
                continue;
            }
            for req in &skill.requires {
                if req == &skill.id {
                    report.self_loops.push(skill.id.clone());
                } else if !self.index.contains_key(req) {
                    report.dangling.push(DanglingReference {
                        skill_id: skill.id.clone(),
                        missing: req.clone(),
                    });
                }
            }
        }

        report.cycles = self.find_cycles();
        report
    }

    /// Strongly connected components with more than one member (Tarjan).
    fn find_cycles(&self) -> Vec<Vec<String>> {
        struct Tarjan<'g> {
            graph: &'g SkillGraph,
            counter: usize,
            indices: HashMap<usize, usize>,
            lowlinks: HashMap<usize, usize>,
            stack: Vec<usize>,
            on_stack: HashSet<usize>,
            components: Vec<Vec<String>>,
        }

        impl Tarjan<'_> {
            fn strong_connect(&mut self, node: usize) {
                self.indices.insert(node, self.counter);
                self.lowlinks.insert(node, self.counter);
                self.counter += 1;
                self.stack.push(node);
                self.on_stack.insert(node);

                let graph = self.graph;
                for &next in &graph.dependents[node] {
                    if !self.indices.contains_key(&next) {
                        self.strong_connect(next);
                        let low = self.lowlinks[&node].min(self.lowlinks[&next]);
                        self.lowlinks.insert(node, low);
                    } else if self.on_stack.contains(&next) {
                        let low = self.lowlinks[&node].min(self.indices[&next]);
                        self.lowlinks.insert(node, low);
                    }
                }

                if self.lowlinks[&node] == self.indices[&node] {
                    let mut component = Vec::new();
                    while let Some(member) = self.stack.pop() {
                        self.on_stack.remove(&member);
                        component.push(graph.skills[member].id.clone());
                        if member == node {
                            break;
                        }
                    }
                    if component.len() > 1 {
                        component.sort();
                        self.components.push(component);
                    }
                }
            }
        }

        let mut tarjan = Tarjan {
            graph: self,
            counter: 0,
            indices: HashMap::new(),
            lowlinks: HashMap::new(),
            stack: Vec::new(),
            on_stack: HashSet::new(),
            components: Vec::new(),
        };
        for node in 0..self.skills.len() {
            if !tarjan.indices.contains_key(&node) {
                tarjan.strong_connect(node);
            }
        }
        tarjan.components
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub skill_id: String,
    pub missing: String,
}

/// Findings of [`SkillGraph::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphReport {
    pub duplicate_ids: Vec<String>,
    pub self_loops: Vec<String>,
    pub dangling: Vec<DanglingReference>,
    pub cycles: Vec<Vec<String>>,
}

impl GraphReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty()
            && self.self_loops.is_empty()
            && self.dangling.is_empty()
            && self.cycles.is_empty()
    }

    /// Findings that make the graph unusable as a tree (dangling refs are
    /// tolerated).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.duplicate_ids.is_empty() || !self.self_loops.is_empty() || !self.cycles.is_empty()
    }
}
