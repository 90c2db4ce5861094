// src/config/model.rs

use serde::Deserialize;

use crate::graph::{Action, NavGraph, NORMAL_NODE_TYPE};
use crate::pathfinding::DEFAULT_MAX_ALTERNATIVES;

/// Graph definition file as read from TOML, before validation.
///
/// ```toml
/// [planner]
/// max_alternatives = 3
///
/// [[node]]
/// id = "home"
/// node_type = "entry"
///
/// [[node]]
/// id = "menu"
/// label = "Main menu"
/// is_entry_point = true
///
/// [[edge]]
/// from = "home"
/// to = "menu"
///
/// [[edge.actions]]
/// id = "home_key"
/// command = "press_key"
/// params = { key = "HOME" }
/// ```
///
/// All sections are optional at the parsing stage; validation requires at
/// least one node.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawGraphFile {
    #[serde(default)]
    pub planner: PlannerSection,

    #[serde(default)]
    pub node: Vec<NodeDef>,

    #[serde(default)]
    pub edge: Vec<EdgeDef>,
}

/// `[planner]` section: query defaults for callers of the graph.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSection {
    /// How many alternative paths to list.
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,

    /// Wall-clock budget for a single planning call, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_max_alternatives() -> usize {
    DEFAULT_MAX_ALTERNATIVES
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            max_alternatives: default_max_alternatives(),
            timeout_ms: None,
        }
    }
}

/// `[[node]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDef {
    pub id: String,

    /// Display label; defaults to `id`.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default = "default_node_type")]
    pub node_type: String,

    #[serde(default)]
    pub is_entry_point: bool,
}

fn default_node_type() -> String {
    NORMAL_NODE_TYPE.to_string()
}

/// `[[edge]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDef {
    pub from: String,
    pub to: String,

    #[serde(default)]
    pub actions: Vec<Action>,

    #[serde(default)]
    pub retry_actions: Vec<Action>,

    #[serde(default)]
    pub final_wait_time_ms: u64,
}

/// Validated graph definition.
///
/// Only constructed through `TryFrom<RawGraphFile>`, so holding one means the
/// graph invariants hold.
#[derive(Debug, Clone)]
pub struct GraphFile {
    pub planner: PlannerSection,
    pub graph: NavGraph,
}

impl GraphFile {
    pub(crate) fn new_unchecked(planner: PlannerSection, graph: NavGraph) -> Self {
        Self { planner, graph }
    }
}
