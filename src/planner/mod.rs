// src/planner/mod.rs

//! Edge-validation planning.
//!
//! - [`greedy`] walks the graph and emits a raw sequence covering every edge.
//! - [`cleanup`] removes redundant navigation from that raw sequence.
//!
//! [`plan_validation_sequence`] ties both together and attaches metrics.

pub mod cleanup;
pub mod greedy;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::analysis::{SequenceMetrics, analyze};
use crate::errors::{NavError, Result};
use crate::graph::{EdgeKey, NavGraph, NodeId};
use crate::transition::Transition;

/// Non-fatal conditions attached to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PlanWarning {
    /// The walk stopped because no remaining edge is reachable from
    /// `position`.
    PartialCoverage {
        position: NodeId,
        unvisited: Vec<EdgeKey>,
    },
    /// A defensive check tripped; the plan is the best computed so far.
    InternalInvariantViolation { detail: String },
}

impl PlanWarning {
    pub fn reason(&self) -> &'static str {
        match self {
            PlanWarning::PartialCoverage { .. } => "partial_coverage",
            PlanWarning::InternalInvariantViolation { .. } => "internal_invariant_violation",
        }
    }
}

/// Ordered plan that validates every reachable edge at least once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSequence {
    pub start_id: NodeId,
    pub steps: Vec<Transition>,
    pub metrics: SequenceMetrics,
    pub total_edges: usize,
    /// Edges the walk could not reach, sorted.
    pub unvisited_edges: Vec<EdgeKey>,
    pub warnings: Vec<PlanWarning>,
}

impl ValidationSequence {
    pub fn is_partial(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::PartialCoverage { .. }))
    }

    pub fn has_invariant_violation(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::InternalInvariantViolation { .. }))
    }

    /// Edges covered by `edge_validation` steps.
    pub fn validated_edges(&self) -> BTreeSet<EdgeKey> {
        self.steps
            .iter()
            .filter(|t| t.is_validation())
            .map(|t| (t.from_id.clone(), t.to_id.clone()))
            .collect()
    }

    /// Hex blake3 digest of the canonical JSON encoding of `steps`.
    ///
    /// Plans for the same graph always share a digest.
    pub fn digest(&self) -> Result<String> {
        let bytes = serde_json::to_vec(&self.steps).map_err(anyhow::Error::from)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// Plan a sequence that exercises every edge of `graph`.
///
/// The result is byte-identical for identical graphs. Unreachable residue and
/// internal inconsistencies are reported as [`PlanWarning`]s on the returned
/// sequence rather than as errors; only an empty graph is an error.
pub fn plan_validation_sequence(graph: &NavGraph) -> Result<ValidationSequence> {
    let start = greedy::choose_start(graph).ok_or(NavError::EmptyGraph)?;

    let walk = greedy::walk(graph, start);
    let cleaned = cleanup::post_process(&walk.start_id, &walk.steps);

    let mut warnings = walk.warnings;
    if let Some(detail) = cleaned.fallback_reason {
        warnings.push(PlanWarning::InternalInvariantViolation { detail });
    }

    let metrics = analyze(&cleaned.steps);
    info!(
        start = %walk.start_id,
        steps = metrics.total_steps,
        validations = metrics.edge_validations,
        navigation = metrics.navigation_steps,
        unvisited = walk.unvisited.len(),
        rating = %metrics.rating,
        "validation sequence planned"
    );

    Ok(ValidationSequence {
        start_id: walk.start_id,
        steps: cleaned.steps,
        metrics,
        total_edges: graph.edge_count(),
        unvisited_edges: walk.unvisited,
        warnings,
    })
}
