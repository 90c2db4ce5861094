// src/pathfinding/enumerate.rs

use std::collections::BTreeSet;

use petgraph::visit::Bfs;
use tracing::debug;

use crate::errors::{NavError, Result};
use crate::graph::{NavGraph, NodeId};
use crate::pathfinding::shortest::BfsTree;
use crate::transition::{Transition, TransitionKind, format_path};

/// Number of alternative paths returned when the caller does not say.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// Up to `max_results` simple paths from `start` to `target`, shortest first.
///
/// Paths are searched by iterative deepening from the BFS distance of
/// `target`: each round walks depth-first with successors in ascending id
/// order and keeps the paths of exactly that length. Paths therefore come out
/// ordered by length and then lexically, only the current path is held in
/// memory, and the search stops as soon as enough paths are collected.
pub fn all_simple_paths(
    graph: &NavGraph,
    start: &str,
    target: &str,
    max_results: usize,
) -> Result<Vec<Vec<Transition>>> {
    if graph.is_empty() {
        return Err(NavError::EmptyGraph);
    }
    graph.require_node(start)?;
    graph.require_node(target)?;

    if start == target || max_results == 0 {
        return Ok(Vec::new());
    }

    let Some(shortest) = BfsTree::build(graph, start).distance(target) else {
        debug!(start, target, "target unreachable; no alternatives");
        return Ok(Vec::new());
    };

    let mut found: Vec<Vec<NodeId>> = Vec::new();
    let mut path = vec![start.to_string()];
    // A simple path has at most `node_count - 1` hops.
    for hops in shortest..graph.node_count() {
        extend_paths(graph, target, hops, max_results, &mut path, &mut found);
        if found.len() >= max_results {
            break;
        }
    }

    found
        .iter()
        .map(|path| format_path(graph, path, TransitionKind::EdgeValidation))
        .collect()
}

/// Depth-first extension of `path` by exactly `hops_left` hops ending on
/// `target`.
fn extend_paths(
    graph: &NavGraph,
    target: &str,
    hops_left: usize,
    max_results: usize,
    path: &mut Vec<NodeId>,
    found: &mut Vec<Vec<NodeId>>,
) {
    let Some(last) = path.last().cloned() else {
        return;
    };
    for next in graph.successors(&last) {
        if found.len() >= max_results {
            return;
        }
        if path.iter().any(|n| n == next) {
            continue;
        }
        if next == target {
            if hops_left == 1 {
                let mut complete = path.clone();
                complete.push(next.to_string());
                found.push(complete);
            }
            continue;
        }
        if hops_left > 1 {
            path.push(next.to_string());
            extend_paths(graph, target, hops_left - 1, max_results, path, found);
            path.pop();
        }
    }
}

/// Nodes reachable from `from_id` over directed edges, including itself.
pub fn reachable(graph: &NavGraph, from_id: &str) -> Result<BTreeSet<NodeId>> {
    graph.require_node(from_id)?;
    Ok(reachable_from(graph, from_id))
}

/// Unchecked variant of [`reachable`]; an unknown id yields an empty set.
pub(crate) fn reachable_from(graph: &NavGraph, from_id: &str) -> BTreeSet<NodeId> {
    let Some(node) = graph.node(from_id) else {
        return BTreeSet::new();
    };
    let topology = graph.topology();
    let mut bfs = Bfs::new(&topology, node.id.as_str());
    let mut out = BTreeSet::new();
    while let Some(id) = bfs.next(&topology) {
        out.insert(id.to_string());
    }
    out
}
