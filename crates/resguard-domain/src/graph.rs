//! Directed "depends-on" graph between resource ids.
//!
//! Edges point from dependent to dependency: `add_edge("vm", "disk")` records that `vm`
//! depends on `disk`, so `disk` cannot be removed while `vm` exists.
//!
//! Unknown ids are deliberately permissive: queries against an id that was never added
//! report it as safe with no dependents. Callers that must tell "safe" apart from "never
//! seen" use [`DependencyGraph::lookup`] or [`DependencyGraph::deletion_verdict`].
//!
//! The graph has no interior locking. Mutations need `&mut self`, so the borrow checker
//! already keeps writes away from concurrent reads.

use resguard_types::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::{debug, warn};

/// Metadata stored for a registered node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub resource_id: String,
    pub name: String,
    pub resource_type: String,
    pub provider: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, JsonValue>,
}

impl GraphNode {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            name: String::new(),
            resource_type: String::new(),
            provider: String::new(),
            metadata: BTreeMap::new(),
        }
    }
}

impl From<&Resource> for GraphNode {
    fn from(r: &Resource) -> Self {
        Self {
            resource_id: r.resource_id.clone(),
            name: r.name.clone(),
            resource_type: r.resource_type.clone(),
            provider: r.provider.as_str().to_string(),
            metadata: r.metadata.clone(),
        }
    }
}

/// Result of looking an id up in the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeLookup<'a> {
    /// Added through `add_node`/`add_resource`.
    Registered(&'a GraphNode),
    /// Only ever seen as an edge endpoint.
    Placeholder,
    Unknown,
}

/// Safety verdict that keeps "never seen" distinct from "nothing depends on it".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeletionVerdict {
    UnknownNode,
    Safe,
    Blocked { dependents: Vec<String> },
}

impl DeletionVerdict {
    /// Unknown nodes count as safe.
    pub fn is_safe(&self) -> bool {
        !matches!(self, DeletionVerdict::Blocked { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionImpact {
    pub safe: bool,
    pub direct_dependents: Vec<String>,
    /// Everything reachable over inbound edges, minus the direct dependents, in BFS order.
    ///
    /// When the target sits on a cycle it can appear here itself.
    pub transitive_dependents: Vec<String>,
}

#[derive(Clone, Debug, Default)]
struct Entry {
    /// `None` for auto-vivified placeholders.
    node: Option<GraphNode>,
    dependents: Vec<String>,
    dependencies: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    entries: BTreeMap<String, Entry>,
    edge_count: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes placeholders.
    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upsert by id. Overwrites metadata and upgrades a placeholder in place, keeping its edges.
    pub fn add_node(&mut self, node: GraphNode) {
        let entry = self.entries.entry(node.resource_id.clone()).or_default();
        entry.node = Some(node);
    }

    pub fn add_resource(&mut self, resource: &Resource) {
        self.add_node(GraphNode::from(resource));
    }

    /// `dependent_id` depends on `dependency_id`. Missing endpoints are created as placeholders.
    /// Adding the same edge twice is a no-op.
    pub fn add_edge(&mut self, dependent_id: &str, dependency_id: &str) {
        let dependent = self.entries.entry(dependent_id.to_string()).or_default();
        if dependent.dependencies.iter().any(|d| d == dependency_id) {
            return;
        }
        dependent.dependencies.push(dependency_id.to_string());

        self.entries
            .entry(dependency_id.to_string())
            .or_default()
            .dependents
            .push(dependent_id.to_string());
        self.edge_count += 1;

        debug!(dependent = dependent_id, dependency = dependency_id, "dependency edge added");
    }

    pub fn lookup(&self, id: &str) -> NodeLookup<'_> {
        match self.entries.get(id) {
            Some(Entry { node: Some(node), .. }) => NodeLookup::Registered(node),
            Some(_) => NodeLookup::Placeholder,
            None => NodeLookup::Unknown,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Metadata for a registered node. Placeholders and unknown ids have none.
    pub fn resource_info(&self, id: &str) -> Option<&GraphNode> {
        match self.lookup(id) {
            NodeLookup::Registered(node) => Some(node),
            NodeLookup::Placeholder | NodeLookup::Unknown => None,
        }
    }

    /// True when `id` is unknown or nothing depends on it.
    pub fn is_safe_to_delete(&self, id: &str) -> bool {
        let dependents = self.get_dependents(id);
        if dependents.is_empty() {
            return true;
        }

        let shown: Vec<&str> = dependents.iter().take(5).map(String::as_str).collect();
        let more = if dependents.len() > 5 { "..." } else { "" };
        warn!(
            resource_id = id,
            count = dependents.len(),
            "resource has dependents: [{}]{}",
            shown.join(", "),
            more
        );
        false
    }

    pub fn deletion_verdict(&self, id: &str) -> DeletionVerdict {
        match self.entries.get(id) {
            None => DeletionVerdict::UnknownNode,
            Some(entry) if entry.dependents.is_empty() => DeletionVerdict::Safe,
            Some(entry) => DeletionVerdict::Blocked {
                dependents: entry.dependents.clone(),
            },
        }
    }

    /// Direct predecessors: the ids that depend on `id`, in insertion order.
    pub fn get_dependents(&self, id: &str) -> Vec<String> {
        self.entries
            .get(id)
            .map(|e| e.dependents.clone())
            .unwrap_or_default()
    }

    /// Direct successors: the ids `id` depends on, in insertion order.
    pub fn get_dependencies(&self, id: &str) -> Vec<String> {
        self.entries
            .get(id)
            .map(|e| e.dependencies.clone())
            .unwrap_or_default()
    }

    /// Cascade analysis over inbound edges.
    pub fn deletion_impact(&self, id: &str) -> DeletionImpact {
        let Some(entry) = self.entries.get(id) else {
            return DeletionImpact {
                safe: true,
                ..DeletionImpact::default()
            };
        };

        let direct = entry.dependents.clone();

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut order: Vec<&str> = Vec::new();
        let mut queue: VecDeque<&str> = direct.iter().map(String::as_str).collect();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            if let Some(e) = self.entries.get(current) {
                queue.extend(e.dependents.iter().map(String::as_str));
            }
        }

        let transitive = order
            .into_iter()
            .filter(|n| !direct.iter().any(|d| d == n))
            .map(str::to_string)
            .collect();

        DeletionImpact {
            safe: direct.is_empty(),
            direct_dependents: direct,
            transitive_dependents: transitive,
        }
    }

    /// Nodes with at least one dependency on an id that was never registered. Sorted by id.
    pub fn get_orphaned_nodes(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| {
                entry.dependencies.iter().any(|dep| {
                    !matches!(self.entries.get(dep), Some(Entry { node: Some(_), .. }))
                })
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.edge_count = 0;
    }
}
