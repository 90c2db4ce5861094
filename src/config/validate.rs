// src/config/validate.rs

use std::collections::BTreeSet;

use crate::config::model::{EdgeDef, GraphFile, NodeDef, PlannerSection, RawGraphFile};
use crate::errors::{NavError, Result};
use crate::graph::{Edge, NavGraph, Node};

impl TryFrom<RawGraphFile> for GraphFile {
    type Error = NavError;

    fn try_from(raw: RawGraphFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_graph(&raw)?;
        let graph = build_graph(raw.node, raw.edge)?;
        Ok(GraphFile::new_unchecked(raw.planner, graph))
    }
}

fn validate_raw_graph(raw: &RawGraphFile) -> Result<()> {
    ensure_has_nodes(raw)?;
    validate_planner_section(&raw.planner)?;
    validate_node_ids(raw)?;
    validate_edges(raw)?;
    Ok(())
}

fn ensure_has_nodes(raw: &RawGraphFile) -> Result<()> {
    if raw.node.is_empty() {
        return Err(NavError::ConfigError(
            "graph must contain at least one [[node]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_planner_section(planner: &PlannerSection) -> Result<()> {
    if planner.max_alternatives == 0 {
        return Err(NavError::ConfigError(
            "[planner].max_alternatives must be >= 1 (got 0)".to_string(),
        ));
    }
    if planner.timeout_ms == Some(0) {
        return Err(NavError::ConfigError(
            "[planner].timeout_ms must be >= 1 when set (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_node_ids(raw: &RawGraphFile) -> Result<()> {
    let mut seen = BTreeSet::new();
    for node in raw.node.iter() {
        if node.id.trim().is_empty() {
            return Err(NavError::ConfigError(
                "node id must not be empty".to_string(),
            ));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(NavError::ConfigError(format!(
                "node '{}' is defined more than once",
                node.id
            )));
        }
    }
    Ok(())
}

fn validate_edges(raw: &RawGraphFile) -> Result<()> {
    let ids: BTreeSet<&str> = raw.node.iter().map(|n| n.id.as_str()).collect();
    let mut seen = BTreeSet::new();

    for edge in raw.edge.iter() {
        for endpoint in [&edge.from, &edge.to] {
            if !ids.contains(endpoint.as_str()) {
                return Err(NavError::ConfigError(format!(
                    "edge '{}' -> '{}' references unknown node '{}'",
                    edge.from, edge.to, endpoint
                )));
            }
        }
        if !seen.insert((edge.from.as_str(), edge.to.as_str())) {
            return Err(NavError::ConfigError(format!(
                "edge '{}' -> '{}' is defined more than once",
                edge.from, edge.to
            )));
        }
    }
    Ok(())
}

fn build_graph(nodes: Vec<NodeDef>, edges: Vec<EdgeDef>) -> Result<NavGraph> {
    let mut graph = NavGraph::new();

    for def in nodes {
        let label = def.label.unwrap_or_else(|| def.id.clone());
        graph.add_node(
            Node::new(def.id)
                .with_label(label)
                .with_type(def.node_type)
                .entry_point(def.is_entry_point),
        )?;
    }

    for def in edges {
        graph.add_edge(Edge {
            from_id: def.from,
            to_id: def.to,
            actions: def.actions,
            retry_actions: def.retry_actions,
            final_wait_time_ms: def.final_wait_time_ms,
        })?;
    }

    Ok(graph)
}
