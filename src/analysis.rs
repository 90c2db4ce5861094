// src/analysis.rs

//! Efficiency metrics over a validation sequence.
//!
//! Purely diagnostic: nothing here feeds back into planning.

use std::fmt;

use serde::Serialize;

use crate::transition::{Transition, TransitionKind};

/// Qualitative bucket for a sequence's efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Average => "average",
            Rating::NeedsImprovement => "needs_improvement",
        }
    }

    fn from_ratios(efficiency_ratio: f64, bidirectional_efficiency: f64) -> Self {
        if efficiency_ratio > 0.8 && bidirectional_efficiency > 0.5 {
            Rating::Excellent
        } else if efficiency_ratio > 0.7 {
            Rating::Good
        } else if efficiency_ratio > 0.5 {
            Rating::Average
        } else {
            Rating::NeedsImprovement
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceMetrics {
    pub total_steps: usize,
    pub edge_validations: usize,
    pub navigation_steps: usize,
    pub entry_edge_steps: usize,
    /// Transitions tagged `bidirectional_immediate`.
    pub bidirectional_optimizations: usize,
    /// Fully optimized pairs (`bidirectional_optimizations / 2`).
    pub pairs_optimized: usize,
    pub efficiency_ratio: f64,
    pub bidirectional_efficiency: f64,
    pub rating: Rating,
}

impl Default for SequenceMetrics {
    fn default() -> Self {
        analyze(&[])
    }
}

/// Compute [`SequenceMetrics`] for `steps`.
pub fn analyze(steps: &[Transition]) -> SequenceMetrics {
    let total_steps = steps.len();
    let count = |kind: TransitionKind| steps.iter().filter(|t| t.kind == kind).count();

    let edge_validations = count(TransitionKind::EdgeValidation);
    let navigation_steps = count(TransitionKind::Navigation);
    let entry_edge_steps = count(TransitionKind::EntryEdge);
    let bidirectional_optimizations = steps
        .iter()
        .filter(|t| t.is_bidirectional_immediate())
        .count();
    let pairs_optimized = bidirectional_optimizations / 2;

    let efficiency_ratio = if total_steps == 0 {
        0.0
    } else {
        edge_validations as f64 / total_steps as f64
    };

    let possible_pairs = edge_validations as f64 / 2.0;
    let bidirectional_efficiency = if edge_validations == 0 {
        0.0
    } else {
        pairs_optimized as f64 / possible_pairs
    };

    SequenceMetrics {
        total_steps,
        edge_validations,
        navigation_steps,
        entry_edge_steps,
        bidirectional_optimizations,
        pairs_optimized,
        efficiency_ratio,
        bidirectional_efficiency,
        rating: Rating::from_ratios(efficiency_ratio, bidirectional_efficiency),
    }
}
