// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::default_graph_path;

/// Command-line arguments for `navgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "navgraph",
    version,
    about = "Plan navigation paths and edge-validation sequences over a device UI graph.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NAVGRAPH_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GraphArgs {
    /// Path to the graph definition file (TOML).
    ///
    /// Default: `NavGraph.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_graph_path())]
    pub graph: PathBuf,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a graph definition and print a summary.
    Check {
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Shortest path to a target screen.
    Path {
        #[command(flatten)]
        graph: GraphArgs,

        /// Target node id.
        #[arg(long, value_name = "ID")]
        target: String,

        /// Start node id (default: the graph's entry point).
        #[arg(long, value_name = "ID")]
        from: Option<String>,

        /// Also list alternative simple paths.
        #[arg(long)]
        alternatives: bool,

        /// Print one action per step instead of grouped transitions.
        #[arg(long)]
        flat: bool,
    },

    /// Plan a sequence that validates every edge.
    Plan {
        #[command(flatten)]
        graph: GraphArgs,

        /// Print the plan digest only.
        #[arg(long)]
        digest: bool,
    },

    /// List nodes reachable from a node.
    Reachable {
        #[command(flatten)]
        graph: GraphArgs,

        /// Node id to start from.
        #[arg(long, value_name = "ID")]
        from: String,
    },
}

impl Command {
    pub fn graph_path(&self) -> &Path {
        match self {
            Command::Check { graph }
            | Command::Path { graph, .. }
            | Command::Plan { graph, .. }
            | Command::Reachable { graph, .. } => &graph.graph,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
