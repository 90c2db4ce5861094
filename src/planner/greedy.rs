// src/planner/greedy.rs

//! Greedy edge-coverage walk.
//!
//! The walk consumes edges leaving the current position when it can and
//! otherwise repositions along the shortest path to the nearest node that
//! still has unvalidated outgoing edges.

use std::collections::BTreeSet;

use tracing::{debug, error, warn};

use crate::errors::{NavError, Result};
use crate::graph::{EdgeKey, NavGraph, Node, NodeId};
use crate::pathfinding::BfsTree;
use crate::planner::PlanWarning;
use crate::transition::{
    Optimization, Transition, TransitionKind, format_path, transition_for_edge,
};

/// Edges not validated yet, ordered by `(from_id, to_id)`.
#[derive(Debug, Clone, Default)]
pub struct RemainingEdges {
    keys: BTreeSet<EdgeKey>,
}

impl RemainingEdges {
    pub fn from_graph(graph: &NavGraph) -> Self {
        Self {
            keys: graph.edge_keys().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.keys.contains(&(from.to_string(), to.to_string()))
    }

    pub fn remove(&mut self, from: &str, to: &str) -> bool {
        self.keys.remove(&(from.to_string(), to.to_string()))
    }

    /// Targets of remaining edges leaving `from`, ascending.
    pub fn targets_from<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let from = from.to_string();
        let lower = (from.clone(), String::new());
        self.keys
            .range(lower..)
            .take_while(move |(f, _)| *f == from)
            .map(|(_, to)| to.as_str())
    }

    pub fn out_count(&self, from: &str) -> usize {
        self.targets_from(from).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeKey> {
        self.keys.iter()
    }

    pub fn into_vec(self) -> Vec<EdgeKey> {
        self.keys.into_iter().collect()
    }
}

/// Where the walk starts: the entry point if any, else the node with the
/// highest total degree (smallest id on ties).
pub fn choose_start(graph: &NavGraph) -> Option<&Node> {
    graph.entry_point().or_else(|| {
        graph.nodes().max_by(|a, b| {
            graph
                .total_degree(&a.id)
                .cmp(&graph.total_degree(&b.id))
                .then_with(|| b.id.cmp(&a.id))
        })
    })
}

/// Pick the next remaining edge leaving `position`.
///
/// A pending self-loop is taken first since it does not move the walk. Then
/// one-way edges (reverse already validated or absent), smallest target id.
/// Otherwise the paired edge whose target has the most remaining outgoing
/// edges wins, smallest target id on ties.
pub fn select_direct_edge(remaining: &RemainingEdges, position: &str) -> Option<NodeId> {
    if remaining.contains(position, position) {
        return Some(position.to_string());
    }

    let candidates: Vec<&str> = remaining.targets_from(position).collect();

    if let Some(one_way) = candidates
        .iter()
        .find(|to| !remaining.contains(to, position))
    {
        return Some(one_way.to_string());
    }

    candidates
        .iter()
        .max_by(|a, b| {
            remaining
                .out_count(a)
                .cmp(&remaining.out_count(b))
                .then_with(|| b.cmp(a))
        })
        .map(|to| to.to_string())
}

/// Raw output of the walk, before post-processing.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    pub start_id: NodeId,
    pub steps: Vec<Transition>,
    pub unvisited: Vec<EdgeKey>,
    pub warnings: Vec<PlanWarning>,
}

fn edge_step(
    graph: &NavGraph,
    from: &str,
    to: &str,
    kind: TransitionKind,
    step: usize,
) -> Result<Transition> {
    let edge = graph.edge(from, to).ok_or_else(|| {
        NavError::InternalInvariantViolation(format!(
            "remaining edge '{from}' -> '{to}' is not in the graph"
        ))
    })?;
    Ok(transition_for_edge(graph, edge, kind, step))
}

/// Walk state threaded through the loop.
struct Walk<'g> {
    graph: &'g NavGraph,
    remaining: RemainingEdges,
    position: NodeId,
    steps: Vec<Transition>,
    warnings: Vec<PlanWarning>,
}

impl<'g> Walk<'g> {
    /// Validate `position -> to` and close the pair immediately when the
    /// reverse edge is still pending.
    fn consume(&mut self, to: NodeId) -> Result<()> {
        let from = std::mem::replace(&mut self.position, to.clone());
        self.remaining.remove(&from, &to);
        let forward = edge_step(
            self.graph,
            &from,
            &to,
            TransitionKind::EdgeValidation,
            self.steps.len() + 1,
        )?;
        debug!(from = %from, to = %to, "validate edge");
        self.steps.push(forward);

        if self.remaining.remove(&to, &from) {
            let mut reverse = edge_step(
                self.graph,
                &to,
                &from,
                TransitionKind::EdgeValidation,
                self.steps.len() + 1,
            )?;
            reverse.optimization = Some(Optimization::BidirectionalImmediate);
            if let Some(forward) = self.steps.last_mut() {
                forward.optimization = Some(Optimization::BidirectionalImmediate);
            }
            debug!(from = %to, to = %from, "validate reverse edge immediately");
            self.steps.push(reverse);
            self.position = from;
        }
        Ok(())
    }

    /// Move to the source of the nearest remaining edge. Returns `false` when
    /// the walk has to stop.
    fn reposition(&mut self) -> Result<bool> {
        let tree = BfsTree::build(self.graph, &self.position);
        let nearest = self
            .remaining
            .iter()
            .filter_map(|(from, to)| tree.distance(from).map(|d| (d, from, to)))
            .min();

        let Some((distance, source, _)) = nearest else {
            let unvisited: Vec<EdgeKey> = self.remaining.iter().cloned().collect();
            warn!(
                position = %self.position,
                unvisited = unvisited.len(),
                "remaining edges are unreachable; stopping with partial coverage"
            );
            self.warnings.push(PlanWarning::PartialCoverage {
                position: self.position.clone(),
                unvisited,
            });
            return Ok(false);
        };

        if distance == 0 {
            let detail = format!(
                "zero-length reposition at '{}' with {} edges remaining",
                self.position,
                self.remaining.len()
            );
            error!(%detail, "planner made no progress");
            self.warnings
                .push(PlanWarning::InternalInvariantViolation { detail });
            return Ok(false);
        }

        let source = source.clone();
        let path = tree.path_to(&source).unwrap_or_default();
        let offset = self.steps.len();
        let mut hops = format_path(self.graph, &path, TransitionKind::Navigation)?;
        for hop in hops.iter_mut() {
            hop.step += offset;
        }
        debug!(
            from = %self.position,
            to = %source,
            hops = hops.len(),
            "reposition"
        );
        self.steps.extend(hops);
        self.position = source;
        Ok(true)
    }

    fn run(&mut self) -> Result<()> {
        // A reposition always lands on a node with remaining outgoing edges,
        // so two in a row mean the walk is stuck.
        let mut repositioned = false;

        while !self.remaining.is_empty() {
            if let Some(next) = select_direct_edge(&self.remaining, &self.position) {
                repositioned = false;
                self.consume(next)?;
                continue;
            }

            if repositioned {
                let detail = format!(
                    "reposition to '{}' did not lead to a remaining edge ({} left)",
                    self.position,
                    self.remaining.len()
                );
                error!(%detail, "planner made no progress");
                self.warnings
                    .push(PlanWarning::InternalInvariantViolation { detail });
                break;
            }

            if !self.reposition()? {
                break;
            }
            repositioned = true;
        }
        Ok(())
    }
}

/// Run the greedy walk over every edge of `graph`, starting at `start`.
///
/// Never fails: an internal error ends the walk early and is recorded as a
/// warning next to the steps produced so far.
pub fn walk(graph: &NavGraph, start: &Node) -> WalkOutcome {
    let mut state = Walk {
        graph,
        remaining: RemainingEdges::from_graph(graph),
        position: start.id.clone(),
        steps: Vec::new(),
        warnings: Vec::new(),
    };

    if let Err(err) = state.run() {
        error!(error = %err, "planner aborted");
        state
            .warnings
            .push(PlanWarning::InternalInvariantViolation {
                detail: err.to_string(),
            });
    }

    WalkOutcome {
        start_id: start.id.clone(),
        steps: state.steps,
        unvisited: state.remaining.into_vec(),
        warnings: state.warnings,
    }
}
