// src/pathfinding/diagnostics.rs

//! Connectivity diagnostics attached to unreachable-target errors.

use std::collections::BTreeSet;

use petgraph::unionfind::UnionFind;
use serde::Serialize;

use crate::graph::{NavGraph, NodeId};
use crate::pathfinding::enumerate::reachable_from;

/// Weak (undirected) component structure of a graph.
#[derive(Debug, Clone)]
pub struct WeakComponents {
    /// Component label per node, indexed by insertion order.
    labels: Vec<usize>,
    ids: Vec<NodeId>,
}

impl WeakComponents {
    pub fn compute(graph: &NavGraph) -> Self {
        let ids: Vec<NodeId> = graph.nodes().map(|n| n.id.clone()).collect();
        let mut uf: UnionFind<usize> = UnionFind::new(ids.len());
        for edge in graph.edges() {
            if let (Some(a), Some(b)) = (
                graph.node_index(&edge.from_id),
                graph.node_index(&edge.to_id),
            ) {
                uf.union(a, b);
            }
        }
        let labels = (0..ids.len()).map(|i| uf.find(i)).collect();
        Self { labels, ids }
    }

    pub fn count(&self) -> usize {
        self.labels.iter().collect::<BTreeSet<_>>().len()
    }

    /// Whether the underlying undirected graph is connected.
    pub fn is_connected(&self) -> bool {
        self.count() <= 1
    }

    /// Sorted members of the component containing `id`.
    pub fn component_of(&self, id: &str) -> Vec<NodeId> {
        let Some(pos) = self.ids.iter().position(|n| n == id) else {
            return Vec::new();
        };
        let label = self.labels[pos];
        let members: BTreeSet<&NodeId> = self
            .ids
            .iter()
            .zip(self.labels.iter())
            .filter(|(_, l)| **l == label)
            .map(|(n, _)| n)
            .collect();
        members.into_iter().cloned().collect()
    }

    pub fn same_component(&self, a: &str, b: &str) -> bool {
        let pa = self.ids.iter().position(|n| n == a);
        let pb = self.ids.iter().position(|n| n == b);
        match (pa, pb) {
            (Some(pa), Some(pb)) => self.labels[pa] == self.labels[pb],
            _ => false,
        }
    }
}

/// Why `target` could not be reached from `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreachableDiagnostics {
    pub start: NodeId,
    pub target: NodeId,
    pub graph_connected: bool,
    pub component_count: usize,
    pub start_component: Vec<NodeId>,
    pub target_component: Vec<NodeId>,
    pub same_component: bool,
    /// Directed descendants of `start`, including `start`.
    pub reachable_from_start: Vec<NodeId>,
}

impl UnreachableDiagnostics {
    pub fn collect(graph: &NavGraph, start: &str, target: &str) -> Self {
        let components = WeakComponents::compute(graph);
        Self {
            start: start.to_string(),
            target: target.to_string(),
            graph_connected: components.is_connected(),
            component_count: components.count(),
            start_component: components.component_of(start),
            target_component: components.component_of(target),
            same_component: components.same_component(start, target),
            reachable_from_start: reachable_from(graph, start).into_iter().collect(),
        }
    }
}
