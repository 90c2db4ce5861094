// src/lib.rs

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod pathfinding;
pub mod planner;
pub mod render;
pub mod transition;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, OutputFormat};
use crate::config::load_and_validate;
use crate::errors::NavError;
use crate::graph::NavGraph;

pub use crate::analysis::{Rating, SequenceMetrics, analyze};
pub use crate::errors::Result as NavResult;
pub use crate::pathfinding::{PathOutcome, all_simple_paths, find_path, reachable};
pub use crate::planner::{PlanWarning, ValidationSequence, plan_validation_sequence};
pub use crate::transition::{Transition, TransitionKind};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - graph file loading + validation
/// - the requested query (path / plan / reachability)
/// - the optional wall-clock budget from `[planner].timeout_ms`
/// - text or JSON rendering
pub async fn run(args: CliArgs) -> Result<()> {
    let graph_path = args.command.graph_path().to_path_buf();
    let file = load_and_validate(&graph_path)
        .with_context(|| format!("loading graph definition from {:?}", graph_path))?;
    let format = args.format;
    let budget = file.planner.timeout_ms;

    match args.command {
        Command::Check { .. } => {
            match format {
                OutputFormat::Text => print!("{}", render::graph_summary(&file)),
                OutputFormat::Json => print_json(&CheckSummary::from_graph(&file.graph))?,
            }
            debug!("check complete (no planning)");
        }

        Command::Path {
            target,
            from,
            alternatives,
            flat,
            ..
        } => {
            let graph = Arc::new(file.graph);
            let max_alternatives = file.planner.max_alternatives;
            let report = with_budget(budget, move || {
                path_report(&graph, &target, from.as_deref(), alternatives, max_alternatives)
            })
            .await?;

            match format {
                OutputFormat::Json if flat => print_json(&transition::flatten_actions(&report.path))?,
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text if flat => {
                    print!("{}", render::action_steps(&transition::flatten_actions(&report.path)))
                }
                OutputFormat::Text => {
                    if report.already_at_target {
                        println!("already at '{}'", report.target);
                    } else {
                        print!("{}", render::transitions("path", &report.path));
                    }
                    for (i, alt) in report.alternatives.iter().enumerate() {
                        print!("{}", render::transitions(&format!("alternative {}", i + 1), alt));
                    }
                }
            }
        }

        Command::Plan { digest, .. } => {
            let graph = Arc::new(file.graph);
            let seq = with_budget(budget, move || plan_validation_sequence(&graph)).await?;
            info!(
                steps = seq.steps.len(),
                partial = seq.is_partial(),
                "plan ready"
            );

            if digest {
                println!("{}", seq.digest().map_err(into_report)?);
            } else {
                match format {
                    OutputFormat::Text => print!("{}", render::sequence(&seq)),
                    OutputFormat::Json => print_json(&seq)?,
                }
            }
        }

        Command::Reachable { from, .. } => {
            let nodes = reachable(&file.graph, &from).map_err(into_report)?;
            match format {
                OutputFormat::Text => print!("{}", render::reachable(&from, &nodes)),
                OutputFormat::Json => print_json(&nodes)?,
            }
        }
    }

    Ok(())
}

/// Result of the `path` subcommand.
#[derive(Debug, Serialize)]
struct PathReport {
    target: String,
    already_at_target: bool,
    path: Vec<Transition>,
    alternatives: Vec<Vec<Transition>>,
}

fn path_report(
    graph: &NavGraph,
    target: &str,
    from: Option<&str>,
    alternatives: bool,
    max_alternatives: usize,
) -> NavResult<PathReport> {
    let outcome = find_path(graph, target, from)?;
    let already_at_target = matches!(outcome, PathOutcome::AlreadyAtTarget);

    let alternatives = if alternatives {
        let start = match from {
            Some(id) => id.to_string(),
            None => graph.default_start()?.id.clone(),
        };
        all_simple_paths(graph, &start, target, max_alternatives)?
    } else {
        Vec::new()
    };

    Ok(PathReport {
        target: target.to_string(),
        already_at_target,
        path: outcome.into_transitions(),
        alternatives,
    })
}

/// Machine-readable `check` output.
#[derive(Debug, Serialize)]
struct CheckSummary {
    nodes: usize,
    edges: usize,
    entry_point: Option<String>,
    weak_components: usize,
}

impl CheckSummary {
    fn from_graph(graph: &NavGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            entry_point: graph.entry_point().map(|n| n.id.clone()),
            weak_components: pathfinding::WeakComponents::compute(graph).count(),
        }
    }
}

/// Run a pure planning call on the blocking pool, bounded by `timeout_ms`.
///
/// The core has no suspension points, so an expired budget abandons the
/// result rather than interrupting the computation. Core errors come back
/// tagged with their reason string.
pub async fn with_budget<T, F>(timeout_ms: Option<u64>, f: F) -> Result<T>
where
    F: FnOnce() -> NavResult<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(f);
    let joined = match timeout_ms {
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), handle)
            .await
            .with_context(|| format!("planning exceeded the {ms}ms budget"))?,
        None => handle.await,
    };
    let result = joined.context("planning task failed to complete")?;
    result.map_err(into_report)
}

/// Convert a core error into a report carrying its reason string and, for
/// unreachable targets, the connectivity diagnostics.
fn into_report(err: NavError) -> anyhow::Error {
    let reason = err.reason();
    match err.unreachable_diagnostics() {
        Some(diag) => {
            let details = serde_json::to_string(diag).unwrap_or_default();
            anyhow::anyhow!("[{reason}] {err}; diagnostics: {details}")
        }
        None => anyhow::anyhow!("[{reason}] {err}"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{out}");
    Ok(())
}
