//! Dependency graph over qualified class names.
//!
//! One directed edge per (referencing class, referenced class) pair. Each
//! edge carries the set of every reference site seen between the pair, so a
//! class that uses another both as a field and as a return type gets one
//! edge labeled with both.

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use petgraph::Direction;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Kind of reference that induced an edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeLabel {
    Field,
    Extends,
    Implements,
    /// Return type of the named method
    Return(String),
    /// Parameter type of the named method
    Param(String),
    CtorParam,
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeLabel::Field => f.write_str("field"),
            EdgeLabel::Extends => f.write_str("extends"),
            EdgeLabel::Implements => f.write_str("implements"),
            EdgeLabel::Return(method) => write!(f, "return:{}", method),
            EdgeLabel::Param(method) => write!(f, "param:{}", method),
            EdgeLabel::CtorParam => f.write_str("ctor-param"),
        }
    }
}

impl Serialize for EdgeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Directed graph of class references
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<String, BTreeSet<EdgeLabel>>,
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex; returns false if it was already present
    pub fn add_vertex(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Record a reference from `from` to `to`.
    ///
    /// Returns true if the label was new for this pair. Missing vertices are
    /// added.
    pub fn add_edge(&mut self, from: &str, to: &str, label: EdgeLabel) -> bool {
        let from_idx = self.ensure_vertex(from);
        let to_idx = self.ensure_vertex(to);
        match self.graph.find_edge(from_idx, to_idx) {
            Some(edge) => self.graph[edge].insert(label),
            None => {
                self.graph
                    .add_edge(from_idx, to_idx, BTreeSet::from([label]));
                true
            }
        }
    }

    fn ensure_vertex(&mut self, name: &str) -> NodeIndex {
        self.add_vertex(name);
        self.index[name]
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Vertex names in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Labels of the edge between two classes, if any
    pub fn edge_labels(&self, from: &str, to: &str) -> Option<&BTreeSet<EdgeLabel>> {
        let from_idx = *self.index.get(from)?;
        let to_idx = *self.index.get(to)?;
        let edge = self.graph.find_edge(from_idx, to_idx)?;
        Some(&self.graph[edge])
    }

    /// Outgoing references of a class, sorted by target name
    pub fn outgoing(&self, name: &str) -> Vec<(&str, &BTreeSet<EdgeLabel>)> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        let mut edges: Vec<(&str, &BTreeSet<EdgeLabel>)> = self
            .graph
            .edges(idx)
            .map(|e| (self.graph[e.target()].as_str(), e.weight()))
            .collect();
        edges.sort_by(|a, b| a.0.cmp(b.0));
        edges
    }

    /// Classes that reference `name` directly
    pub fn referrers(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    /// Every class reachable from `root`, the root included
    pub fn reachable_from(&self, root: &str) -> HashSet<&str> {
        let mut reached = HashSet::new();
        let Some(&start) = self.index.get(root) else {
            return reached;
        };
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(idx) = dfs.next(&self.graph) {
            reached.insert(self.graph[idx].as_str());
        }
        reached
    }

    /// Copy of the graph without `root` and everything reachable from it
    pub fn without_subgraph(&self, root: &str) -> DependencyGraph {
        let removed = self.reachable_from(root);
        let graph = self.graph.filter_map(
            |_, name| (!removed.contains(name.as_str())).then(|| name.clone()),
            |_, labels| Some(labels.clone()),
        );
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].clone(), idx))
            .collect();
        DependencyGraph { graph, index }
    }

    /// Render in Graphviz DOT, edge labels joined with `,`
    pub fn to_dot(&self) -> String {
        let labeled = self.graph.map(
            |_, name| name.clone(),
            |_, labels| {
                labels
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            },
        );
        format!("{}", Dot::new(&labeled))
    }
}
