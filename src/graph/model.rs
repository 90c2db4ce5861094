// src/graph/model.rs

use std::collections::{BTreeMap, HashMap};

use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};

use crate::errors::{NavError, Result};

/// Node type tag for dedicated "return to root" source screens.
pub const ENTRY_NODE_TYPE: &str = "entry";

/// Node type tag used when a definition does not specify one.
pub const NORMAL_NODE_TYPE: &str = "normal";

pub type NodeId = String;

/// Directed edge key: `(from_id, to_id)`.
pub type EdgeKey = (NodeId, NodeId);

/// A single screen of the device UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub node_type: String,
    pub is_entry_point: bool,
}

impl Node {
    /// Plain node with `label = id` and the `"normal"` type tag.
    pub fn new(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type: NORMAL_NODE_TYPE.to_string(),
            is_entry_point: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    pub fn entry_point(mut self, is_entry_point: bool) -> Self {
        self.is_entry_point = is_entry_point;
        self
    }

    /// Whether this node is tagged as a dedicated entry (home) screen.
    pub fn is_entry_type(&self) -> bool {
        self.node_type == ENTRY_NODE_TYPE
    }
}

/// Opaque action descriptor dispatched by an external executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub command: String,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub wait_time_ms: u64,
}

impl Action {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            command: command.into(),
            params: BTreeMap::new(),
            wait_time_ms: 0,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn with_wait(mut self, wait_time_ms: u64) -> Self {
        self.wait_time_ms = wait_time_ms;
        self
    }
}

/// A directed transition between two screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from_id: NodeId,
    pub to_id: NodeId,
    pub actions: Vec<Action>,
    /// Executed downstream only when `actions` fail; never read by the planner.
    pub retry_actions: Vec<Action>,
    pub final_wait_time_ms: u64,
}

impl Edge {
    pub fn new(from_id: impl Into<NodeId>, to_id: impl Into<NodeId>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            actions: Vec::new(),
            retry_actions: Vec::new(),
            final_wait_time_ms: 0,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_retry_action(mut self, action: Action) -> Self {
        self.retry_actions.push(action);
        self
    }

    pub fn with_final_wait(mut self, final_wait_time_ms: u64) -> Self {
        self.final_wait_time_ms = final_wait_time_ms;
        self
    }

    pub fn key(&self) -> EdgeKey {
        (self.from_id.clone(), self.to_id.clone())
    }
}

/// In-memory navigation graph of a device UI.
///
/// Nodes keep their insertion order (used to resolve a default start node);
/// edges are kept sorted by `(from_id, to_id)` so every traversal that walks
/// them is deterministic.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Node ids must be unique.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.index.contains_key(&node.id) {
            return Err(NavError::DuplicateNode(node.id));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Insert an edge. Both endpoints must already exist and the ordered pair
    /// must not be present yet.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [&edge.from_id, &edge.to_id] {
            if !self.index.contains_key(endpoint) {
                return Err(NavError::NodeNotFound(endpoint.clone()));
            }
        }
        let key = edge.key();
        if self.edges.contains_key(&key) {
            return Err(NavError::DuplicateEdge(key.0, key.1));
        }
        self.edges.insert(key, edge);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Look up a node, mapping absence to [`NavError::NodeNotFound`].
    pub fn require_node(&self, id: &str) -> Result<&Node> {
        self.node(id)
            .ok_or_else(|| NavError::NodeNotFound(id.to_string()))
    }

    /// Position of a node in insertion order.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Edges sorted by `(from_id, to_id)`.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edge(from, to).is_some()
    }

    /// Outgoing edges of `from`, ascending by `to_id`.
    pub fn outgoing<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a Edge> + use<'a> {
        let from = from.to_string();
        let lower = (from.clone(), String::new());
        self.edges
            .range(lower..)
            .take_while(move |((f, _), _)| *f == from)
            .map(|(_, edge)| edge)
    }

    /// Direct successors of `from`, ascending by id.
    pub fn successors<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.outgoing(from).map(|edge| edge.to_id.as_str())
    }

    /// Incoming edges of `to`, ascending by `from_id`.
    pub fn incoming<'a>(&'a self, to: &str) -> impl Iterator<Item = &'a Edge> + use<'a> {
        let to = to.to_string();
        self.edges.values().filter(move |edge| edge.to_id == to)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.outgoing(id).count()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.incoming(id).count()
    }

    pub fn total_degree(&self, id: &str) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    /// First node flagged `is_entry_point`, in insertion order.
    pub fn entry_point(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_entry_point)
    }

    /// Default start for path queries: the entry point, else the first node.
    pub fn default_start(&self) -> Result<&Node> {
        self.entry_point()
            .or_else(|| self.nodes.first())
            .ok_or(NavError::EmptyGraph)
    }

    /// Borrowed `petgraph` view of the topology, for traversal algorithms.
    pub fn topology(&self) -> DiGraphMap<&str, ()> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for node in self.nodes.iter() {
            graph.add_node(node.id.as_str());
        }
        for (from, to) in self.edges.keys() {
            graph.add_edge(from.as_str(), to.as_str(), ());
        }
        graph
    }
}
