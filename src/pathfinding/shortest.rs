// src/pathfinding/shortest.rs

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::errors::{NavError, Result};
use crate::graph::{Edge, NavGraph, Node, NodeId};
use crate::pathfinding::diagnostics::UnreachableDiagnostics;
use crate::transition::{Transition, TransitionKind, format_path, transition_for_edge};

/// Successful result of [`find_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// Transitions to execute, in order.
    Found(Vec<Transition>),
    /// Start and target are the same node; nothing to do.
    AlreadyAtTarget,
}

impl PathOutcome {
    pub fn transitions(&self) -> &[Transition] {
        match self {
            PathOutcome::Found(t) => t,
            PathOutcome::AlreadyAtTarget => &[],
        }
    }

    pub fn into_transitions(self) -> Vec<Transition> {
        match self {
            PathOutcome::Found(t) => t,
            PathOutcome::AlreadyAtTarget => Vec::new(),
        }
    }
}

/// Unweighted BFS tree rooted at one node.
///
/// Successors are expanded in ascending id order, so the parent chosen for
/// every node (and therefore every reconstructed path) is deterministic.
#[derive(Debug, Clone)]
pub struct BfsTree {
    root: NodeId,
    distance: HashMap<NodeId, usize>,
    parent: HashMap<NodeId, NodeId>,
}

impl BfsTree {
    pub fn build(graph: &NavGraph, root: &str) -> Self {
        let mut distance = HashMap::new();
        let mut parent = HashMap::new();
        let mut queue = VecDeque::new();

        distance.insert(root.to_string(), 0usize);
        queue.push_back(root.to_string());

        while let Some(current) = queue.pop_front() {
            let dist = distance[&current];
            for next in graph.successors(&current) {
                if distance.contains_key(next) {
                    continue;
                }
                distance.insert(next.to_string(), dist + 1);
                parent.insert(next.to_string(), current.clone());
                queue.push_back(next.to_string());
            }
        }

        Self {
            root: root.to_string(),
            distance,
            parent,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Number of hops from the root, or `None` if unreachable.
    pub fn distance(&self, id: &str) -> Option<usize> {
        self.distance.get(id).copied()
    }

    pub fn reaches(&self, id: &str) -> bool {
        self.distance.contains_key(id)
    }

    /// Node path from the root to `id` (both inclusive).
    pub fn path_to(&self, id: &str) -> Option<Vec<NodeId>> {
        if !self.reaches(id) {
            return None;
        }
        let mut path = vec![id.to_string()];
        let mut current = id;
        while let Some(prev) = self.parent.get(current) {
            path.push(prev.clone());
            current = prev.as_str();
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest node path between two nodes, if any.
pub fn shortest_node_path(graph: &NavGraph, from: &str, to: &str) -> Option<Vec<NodeId>> {
    BfsTree::build(graph, from).path_to(to)
}

/// Resolve the start node: an explicit id, else the graph's default start.
fn resolve_start<'g>(graph: &'g NavGraph, start: Option<&str>) -> Result<&'g Node> {
    match start {
        Some(id) => graph.require_node(id),
        None => graph.default_start(),
    }
}

/// Dedicated entry edge into `target`: an edge whose source is an
/// entry-type node. The smallest source id wins.
fn entry_edge_into<'g>(graph: &'g NavGraph, target: &str) -> Option<&'g Edge> {
    graph.incoming(target).find(|edge| {
        graph
            .node(&edge.from_id)
            .is_some_and(|source| source.is_entry_type())
    })
}

/// Find the transitions leading from `start` (or the default start) to
/// `target`.
///
/// A target flagged as entry point is reached through its dedicated entry
/// edge when one exists, regardless of BFS distance.
pub fn find_path(graph: &NavGraph, target: &str, start: Option<&str>) -> Result<PathOutcome> {
    if graph.is_empty() {
        return Err(NavError::EmptyGraph);
    }

    let target_node = graph.require_node(target)?;
    let start_node = resolve_start(graph, start)?;

    if target_node.is_entry_point {
        if let Some(edge) = entry_edge_into(graph, target) {
            debug!(
                from = %edge.from_id,
                to = %edge.to_id,
                "target is an entry point; using dedicated entry edge"
            );
            return Ok(PathOutcome::Found(vec![transition_for_edge(
                graph,
                edge,
                TransitionKind::EntryEdge,
                1,
            )]));
        }
    }

    if start_node.id == target_node.id {
        debug!(node = %target, "already at target");
        return Ok(PathOutcome::AlreadyAtTarget);
    }

    match shortest_node_path(graph, &start_node.id, target) {
        Some(path) => {
            debug!(
                start = %start_node.id,
                target = %target,
                hops = path.len() - 1,
                "shortest path found"
            );
            let transitions = format_path(graph, &path, TransitionKind::EdgeValidation)?;
            Ok(PathOutcome::Found(transitions))
        }
        None => {
            let diag = UnreachableDiagnostics::collect(graph, &start_node.id, target);
            warn!(
                start = %diag.start,
                target = %diag.target,
                graph_connected = diag.graph_connected,
                same_component = diag.same_component,
                reachable = ?diag.reachable_from_start,
                "no path to target"
            );
            Err(NavError::Unreachable(Box::new(diag)))
        }
    }
}
