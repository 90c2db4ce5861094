// src/config/mod.rs

//! Graph definition files.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a definition from disk or a string (`loader.rs`).
//! - Validate node/edge consistency and build a [`NavGraph`](crate::graph::NavGraph)
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_graph_path, load_and_validate, load_from_path, parse_and_validate};
pub use model::{EdgeDef, GraphFile, NodeDef, PlannerSection, RawGraphFile};
