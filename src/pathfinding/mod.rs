// src/pathfinding/mod.rs

//! Path queries over a [`NavGraph`](crate::graph::NavGraph).
//!
//! - [`shortest`] finds the shortest route to one target, with the
//!   entry-edge shortcut for root screens.
//! - [`enumerate`] lists alternative simple paths and reachable sets.
//! - [`diagnostics`] explains why a target could not be reached.

pub mod diagnostics;
pub mod enumerate;
pub mod shortest;

pub use diagnostics::{UnreachableDiagnostics, WeakComponents};
pub use enumerate::{DEFAULT_MAX_ALTERNATIVES, all_simple_paths, reachable};
pub use shortest::{BfsTree, PathOutcome, find_path, shortest_node_path};
