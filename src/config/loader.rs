// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{GraphFile, RawGraphFile};
use crate::errors::Result;

/// Load a graph definition file and return the raw `RawGraphFile`.
///
/// This only performs TOML deserialization; it does **not** check node/edge
/// consistency. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawGraphFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawGraphFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Parse a graph definition from an in-memory TOML string and validate it.
pub fn parse_and_validate(contents: &str) -> Result<GraphFile> {
    let raw: RawGraphFile = toml::from_str(contents)?;
    GraphFile::try_from(raw)
}

/// Load a graph definition file from path and validate it.
///
/// This is the entry point used by the CLI:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - at least one node,
///   - duplicate node ids and duplicate edges,
///   - edges referencing unknown nodes,
///   - `[planner]` sanity.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GraphFile> {
    let raw = load_from_path(&path)?;
    let file = GraphFile::try_from(raw)?;
    debug!(
        path = ?path.as_ref(),
        nodes = file.graph.node_count(),
        edges = file.graph.edge_count(),
        "graph definition loaded"
    );
    Ok(file)
}

/// Graph file used when `--graph` is not given: `NavGraph.toml` in the
/// current working directory.
pub fn default_graph_path() -> PathBuf {
    PathBuf::from("NavGraph.toml")
}
