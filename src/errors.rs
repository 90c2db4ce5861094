// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::pathfinding::diagnostics::UnreachableDiagnostics;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("Duplicate edge: {0} -> {1}")]
    DuplicateEdge(String, String),

    #[error("no path from '{}' to '{}'", .0.start, .0.target)]
    Unreachable(Box<UnreachableDiagnostics>),

    #[error("Internal invariant violation: {0}")]
    InternalInvariantViolation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NavError {
    /// Stable, machine-readable reason string for this error.
    pub fn reason(&self) -> &'static str {
        match self {
            NavError::EmptyGraph => "empty_graph",
            NavError::NodeNotFound(_) => "node_not_found",
            NavError::DuplicateNode(_) => "duplicate_node",
            NavError::DuplicateEdge(..) => "duplicate_edge",
            NavError::Unreachable(_) => "unreachable",
            NavError::InternalInvariantViolation(_) => "internal_invariant_violation",
            NavError::ConfigError(_) => "config_error",
            NavError::IoError(_) => "io_error",
            NavError::TomlError(_) => "toml_error",
            NavError::Other(_) => "other",
        }
    }

    /// Connectivity diagnostics, if this is an [`NavError::Unreachable`].
    pub fn unreachable_diagnostics(&self) -> Option<&UnreachableDiagnostics> {
        match self {
            NavError::Unreachable(diag) => Some(diag),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
