// src/transition.rs

//! Transition records handed to callers, and the conversion from raw
//! node/edge paths into them.

use serde::{Deserialize, Serialize};

use crate::errors::{NavError, Result};
use crate::graph::{Action, Edge, NavGraph, NodeId};

/// Why a transition appears in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// The edge itself is under test.
    EdgeValidation,
    /// Repositioning hop; the edge is only used to move.
    Navigation,
    /// Dedicated "return to root" edge from an entry-type node.
    EntryEdge,
}

impl TransitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::EdgeValidation => "edge_validation",
            TransitionKind::Navigation => "navigation",
            TransitionKind::EntryEdge => "entry_edge",
        }
    }
}

/// Planner optimization applied to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimization {
    /// Both directions of a bidirectional pair were validated back to back.
    BidirectionalImmediate,
}

/// One step of a path or validation plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// 1-based position within the list this transition belongs to.
    pub step: usize,
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub from_label: String,
    pub to_label: String,
    pub description: String,
    pub actions: Vec<Action>,
    pub retry_actions: Vec<Action>,
    pub final_wait_time_ms: u64,
    pub kind: TransitionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
}

impl Transition {
    pub fn is_validation(&self) -> bool {
        self.kind == TransitionKind::EdgeValidation
    }

    pub fn is_navigation(&self) -> bool {
        self.kind == TransitionKind::Navigation
    }

    pub fn is_bidirectional_immediate(&self) -> bool {
        self.optimization == Some(Optimization::BidirectionalImmediate)
    }

    /// True when `other` walks the same edge in the opposite direction.
    pub fn reverses(&self, other: &Transition) -> bool {
        self.from_id == other.to_id && self.to_id == other.from_id
    }
}

/// Human-readable description used for every transition.
pub fn describe(from_label: &str, to_label: &str) -> String {
    format!("Navigate from '{from_label}' to '{to_label}'")
}

/// Build a transition from an edge of `graph`.
///
/// Labels fall back to node ids if an endpoint is somehow missing; the graph
/// rejects such edges on insertion so this only matters for hand-built edges.
pub fn transition_for_edge(
    graph: &NavGraph,
    edge: &Edge,
    kind: TransitionKind,
    step: usize,
) -> Transition {
    let from_label = graph
        .node(&edge.from_id)
        .map(|n| n.label.clone())
        .unwrap_or_else(|| edge.from_id.clone());
    let to_label = graph
        .node(&edge.to_id)
        .map(|n| n.label.clone())
        .unwrap_or_else(|| edge.to_id.clone());

    Transition {
        step,
        from_id: edge.from_id.clone(),
        to_id: edge.to_id.clone(),
        description: describe(&from_label, &to_label),
        from_label,
        to_label,
        actions: edge.actions.clone(),
        retry_actions: edge.retry_actions.clone(),
        final_wait_time_ms: edge.final_wait_time_ms,
        kind,
        optimization: None,
    }
}

/// Convert a node-id path into transitions, one per consecutive pair.
///
/// Every hop must correspond to an edge of `graph`; a missing edge means the
/// path was not derived from this graph and is reported as an internal
/// invariant violation.
pub fn format_path<S: AsRef<str>>(
    graph: &NavGraph,
    path: &[S],
    kind: TransitionKind,
) -> Result<Vec<Transition>> {
    path.windows(2)
        .enumerate()
        .map(|(i, hop)| {
            let (from, to) = (hop[0].as_ref(), hop[1].as_ref());
            let edge = graph.edge(from, to).ok_or_else(|| {
                NavError::InternalInvariantViolation(format!(
                    "path hop '{from}' -> '{to}' has no matching edge"
                ))
            })?;
            Ok(transition_for_edge(graph, edge, kind, i + 1))
        })
        .collect()
}

/// Reassign `step` sequentially from 1.
pub fn renumber(transitions: &mut [Transition]) {
    for (i, t) in transitions.iter_mut().enumerate() {
        t.step = i + 1;
    }
}

/// Single-action record of the flattened legacy view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    /// 1-based position across the whole flattened list.
    pub step: usize,
    /// `step` of the transition this action belongs to.
    pub transition_step: usize,
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub from_label: String,
    pub to_label: String,
    pub description: String,
    pub action: Action,
    /// Last action of its transition; `final_wait_time_ms` applies after it.
    pub is_final_action: bool,
    pub final_wait_time_ms: u64,
}

/// Split grouped transitions into one record per action, preserving order.
///
/// Kept for consumers that cannot handle grouped transitions. Transitions
/// without actions produce no records.
pub fn flatten_actions(transitions: &[Transition]) -> Vec<ActionStep> {
    let mut out = Vec::new();
    for t in transitions {
        let last = t.actions.len().saturating_sub(1);
        for (i, action) in t.actions.iter().enumerate() {
            out.push(ActionStep {
                step: out.len() + 1,
                transition_step: t.step,
                from_id: t.from_id.clone(),
                to_id: t.to_id.clone(),
                from_label: t.from_label.clone(),
                to_label: t.to_label.clone(),
                description: t.description.clone(),
                action: action.clone(),
                is_final_action: i == last,
                final_wait_time_ms: if i == last { t.final_wait_time_ms } else { 0 },
            });
        }
    }
    out
}
