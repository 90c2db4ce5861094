// src/render.rs

//! Plain-text output for the CLI.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::config::GraphFile;
use crate::graph::NodeId;
use crate::planner::{PlanWarning, ValidationSequence};
use crate::transition::{ActionStep, Transition};

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// Summary printed by `navgraph check`.
pub fn graph_summary(file: &GraphFile) -> String {
    let graph = &file.graph;
    let mut out = String::new();

    push_line(&mut out, "navgraph check");
    push_line(
        &mut out,
        format!("  planner.max_alternatives = {}", file.planner.max_alternatives),
    );
    if let Some(ms) = file.planner.timeout_ms {
        push_line(&mut out, format!("  planner.timeout_ms = {ms}"));
    }
    push_line(&mut out, "");

    push_line(&mut out, format!("nodes ({}):", graph.node_count()));
    for node in graph.nodes() {
        let mut line = format!("  - {} ({})", node.id, node.label);
        if node.node_type != crate::graph::NORMAL_NODE_TYPE {
            let _ = write!(line, " type={}", node.node_type);
        }
        if node.is_entry_point {
            line.push_str(" [entry point]");
        }
        push_line(&mut out, line);
    }

    push_line(&mut out, format!("edges ({}):", graph.edge_count()));
    for edge in graph.edges() {
        push_line(
            &mut out,
            format!(
                "  - {} -> {} ({} actions, {} retry, wait {}ms)",
                edge.from_id,
                edge.to_id,
                edge.actions.len(),
                edge.retry_actions.len(),
                edge.final_wait_time_ms
            ),
        );
    }
    out
}

fn transition_line(t: &Transition) -> String {
    let mut line = format!(
        "  {:>3}. [{}] {} -> {}: {}",
        t.step,
        t.kind.as_str(),
        t.from_id,
        t.to_id,
        t.description
    );
    if t.is_bidirectional_immediate() {
        line.push_str(" (bidirectional)");
    }
    let commands: Vec<&str> = t.actions.iter().map(|a| a.command.as_str()).collect();
    if !commands.is_empty() {
        let _ = write!(line, " actions={commands:?}");
    }
    line
}

pub fn transitions(title: &str, steps: &[Transition]) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("{title} ({} steps):", steps.len()));
    for t in steps {
        push_line(&mut out, transition_line(t));
    }
    out
}

pub fn action_steps(steps: &[ActionStep]) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("actions ({}):", steps.len()));
    for s in steps {
        let mut line = format!(
            "  {:>3}. {} -> {}: {} {:?}",
            s.step, s.from_id, s.to_id, s.action.command, s.action.params
        );
        if s.is_final_action && s.final_wait_time_ms > 0 {
            let _ = write!(line, " then wait {}ms", s.final_wait_time_ms);
        }
        push_line(&mut out, line);
    }
    out
}

pub fn sequence(seq: &ValidationSequence) -> String {
    let mut out = transitions(&format!("validation plan from '{}'", seq.start_id), &seq.steps);
    let m = &seq.metrics;

    push_line(&mut out, "");
    push_line(&mut out, "metrics:");
    push_line(
        &mut out,
        format!(
            "  validations = {}/{} edges, navigation = {}, total = {}",
            m.edge_validations, seq.total_edges, m.navigation_steps, m.total_steps
        ),
    );
    push_line(
        &mut out,
        format!(
            "  efficiency = {:.2}, bidirectional = {:.2} ({} pairs), rating = {}",
            m.efficiency_ratio, m.bidirectional_efficiency, m.pairs_optimized, m.rating
        ),
    );

    for warning in seq.warnings.iter() {
        match warning {
            PlanWarning::PartialCoverage { position, unvisited } => push_line(
                &mut out,
                format!(
                    "warning: partial coverage, stopped at '{position}' with {} unreachable edges",
                    unvisited.len()
                ),
            ),
            PlanWarning::InternalInvariantViolation { detail } => {
                push_line(&mut out, format!("warning: internal invariant violation: {detail}"))
            }
        }
    }
    out
}

pub fn reachable(from: &str, nodes: &BTreeSet<NodeId>) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("reachable from '{from}' ({}):", nodes.len()));
    for id in nodes {
        push_line(&mut out, format!("  - {id}"));
    }
    out
}
