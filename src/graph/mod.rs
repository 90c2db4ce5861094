// src/graph/mod.rs

//! Read-only navigation graph of a device UI.
//!
//! - [`model`] holds nodes (screens), edges (transitions) and their action
//!   descriptors.

pub mod model;

pub use model::{
    Action, Edge, EdgeKey, NavGraph, Node, NodeId, ENTRY_NODE_TYPE, NORMAL_NODE_TYPE,
};
