//! Dependency graph between composite types.
//!
//! An edge `B -> A` means "A has a field of type B", so B must be emitted
//! before A. Self-loops and cycles are stored as-is; the orderer copes with them.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

use super::reader::TypeGraph;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    /// Type name -> node index. Node indices follow discovery order.
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build from a type graph. Every composite type becomes a node, even
    /// when it has no composite fields.
    pub fn build(types: &TypeGraph) -> Self {
        let mut deps = Self::default();

        for name in types.names() {
            deps.add_type(name);
        }

        for (name, fields) in types.iter() {
            for field in fields.iter().filter(|f| f.is_composite()) {
                // Targets outside the graph were classified as leaves already.
                if let (Some(&from), Some(&to)) =
                    (deps.index.get(field.target.as_str()), deps.index.get(name))
                {
                    deps.graph.update_edge(from, to, ());
                }
            }
        }

        deps
    }

    fn add_type(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Types that reference `name`, in discovery order.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        self.sorted_neighbors(idx, Direction::Outgoing)
            .into_iter()
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    /// Types that `name` references, in discovery order.
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        self.sorted_neighbors(idx, Direction::Incoming)
            .into_iter()
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    /// Neighbors sorted by node index. petgraph walks adjacency lists newest
    /// first, which would make output depend on edge insertion order.
    pub(crate) fn sorted_neighbors(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    pub fn has_self_loop(&self, name: &str) -> bool {
        self.index
            .get(name)
            .is_some_and(|&idx| self.graph.contains_edge(idx, idx))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in discovery order.
    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }
}
