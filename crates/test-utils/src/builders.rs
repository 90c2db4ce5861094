#![allow(dead_code)]

use navgraph::graph::{Action, Edge, ENTRY_NODE_TYPE, NavGraph, Node};

/// Builder for `NavGraph` to simplify test setup.
///
/// Nodes referenced by an edge are created on demand (in first-mention
/// order), so most graphs can be described by their edges alone.
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn ensure_node(&mut self, id: &str) -> &mut Node {
        let pos = match self.nodes.iter().position(|n| n.id == id) {
            Some(pos) => pos,
            None => {
                self.nodes.push(Node::new(id));
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[pos]
    }

    pub fn node(mut self, id: &str) -> Self {
        self.ensure_node(id);
        self
    }

    pub fn labelled(mut self, id: &str, label: &str) -> Self {
        self.ensure_node(id).label = label.to_string();
        self
    }

    /// Mark `id` as the graph's entry point (`is_entry_point = true`).
    pub fn entry_point(mut self, id: &str) -> Self {
        self.ensure_node(id).is_entry_point = true;
        self
    }

    /// Tag `id` with the `"entry"` node type.
    pub fn entry_node(mut self, id: &str) -> Self {
        self.ensure_node(id).node_type = ENTRY_NODE_TYPE.to_string();
        self
    }

    pub fn edge(mut self, from: &str, to: &str) -> Self {
        self.ensure_node(from);
        self.ensure_node(to);
        self.edges.push(Edge::new(from, to));
        self
    }

    /// Edge carrying a single `press_key` action.
    pub fn keyed_edge(mut self, from: &str, to: &str, key: &str) -> Self {
        self.ensure_node(from);
        self.ensure_node(to);
        let action = Action::new(format!("{from}_{to}"), "press_key")
            .with_param("key", serde_json::Value::String(key.to_string()));
        self.edges.push(Edge::new(from, to).with_action(action));
        self
    }

    /// Both `from -> to` and `to -> from`.
    pub fn bidir(self, a: &str, b: &str) -> Self {
        self.edge(a, b).edge(b, a)
    }

    /// Directed path through all `ids` in order.
    pub fn chain(mut self, ids: &[&str]) -> Self {
        for hop in ids.windows(2) {
            self = self.edge(hop[0], hop[1]);
        }
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.ensure_node(&edge.from_id.clone());
        self.ensure_node(&edge.to_id.clone());
        self.edges.push(edge);
        self
    }

    pub fn build(self) -> NavGraph {
        let mut graph = NavGraph::new();
        for node in self.nodes {
            graph
                .add_node(node)
                .expect("GraphBuilder produced a duplicate node");
        }
        for edge in self.edges {
            graph
                .add_edge(edge)
                .expect("GraphBuilder produced an invalid edge");
        }
        graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Hub `hub` connected in both directions to every leaf.
pub fn star(hub: &str, leaves: &[&str]) -> NavGraph {
    leaves
        .iter()
        .fold(GraphBuilder::new().node(hub), |b, leaf| b.bidir(hub, leaf))
        .build()
}
