// tests/cli_run.rs

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use navgraph::cli::{CliArgs, Command, OutputFormat};
use navgraph::config::default_graph_path;
use navgraph::errors::NavError;
use navgraph::cli::LogLevel;
use navgraph::logging::{build_filter, parse_level_str};
use tracing_subscriber::filter::LevelFilter;
use tempfile::NamedTempFile;

const GRAPH: &str = r#"
[planner]
max_alternatives = 2
timeout_ms = 10000

[[node]]
id = "home"
is_entry_point = true

[[node]]
id = "menu"

[[node]]
id = "island"

[[edge]]
from = "home"
to = "menu"

[[edge]]
from = "menu"
to = "home"
"#;

fn graph_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(GRAPH.as_bytes()).expect("write temp file");
    file
}

fn args(list: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(list).expect("valid arguments")
}

#[test]
fn test_path_arguments_parse() {
    let parsed = args(&[
        "navgraph",
        "path",
        "--graph",
        "ui.toml",
        "--target",
        "menu",
        "--alternatives",
        "--format",
        "json",
    ]);

    assert_eq!(parsed.format, OutputFormat::Json);
    assert_eq!(parsed.command.graph_path(), Path::new("ui.toml"));
    match parsed.command {
        Command::Path {
            target,
            from,
            alternatives,
            flat,
            ..
        } => {
            assert_eq!(target, "menu");
            assert_eq!(from, None);
            assert!(alternatives);
            assert!(!flat);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_graph_path_defaults_to_navgraph_toml() {
    let parsed = args(&["navgraph", "plan"]);

    assert_eq!(parsed.command.graph_path(), default_graph_path().as_path());
    assert_eq!(parsed.command.graph_path(), Path::new("NavGraph.toml"));
    assert_eq!(parsed.format, OutputFormat::Text);
    assert!(parsed.log_level.is_none());
}

#[test]
fn test_path_requires_target() {
    assert!(CliArgs::try_parse_from(["navgraph", "path"]).is_err());
}

#[test]
fn test_log_level_strings() {
    assert_eq!(parse_level_str(" DEBUG "), Some(tracing::Level::DEBUG));
    assert_eq!(parse_level_str("warning"), Some(tracing::Level::WARN));
    assert_eq!(parse_level_str("loud"), None);
}

#[test]
fn test_log_filter_priority() {
    let from_flag = build_filter(Some(LogLevel::Debug), Some("error"));
    assert_eq!(from_flag.max_level_hint(), Some(LevelFilter::DEBUG));

    let from_env = build_filter(None, Some("warning"));
    assert_eq!(from_env.max_level_hint(), Some(LevelFilter::WARN));

    assert_eq!(build_filter(None, None).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(build_filter(None, Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
}

#[test]
fn test_log_env_accepts_module_directives() {
    let filter = build_filter(None, Some("warn,navgraph::planner=debug"));

    assert!(filter.to_string().contains("navgraph::planner=debug"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

    let invalid = build_filter(None, Some("navgraph=loudest"));
    assert_eq!(invalid.max_level_hint(), Some(LevelFilter::INFO));
}

#[tokio::test]
async fn test_run_plan_and_path_succeed() {
    let file = graph_file();
    let path = file.path().to_string_lossy().to_string();

    navgraph::run(args(&["navgraph", "plan", "--graph", &path]))
        .await
        .unwrap();
    navgraph::run(args(&["navgraph", "plan", "--graph", &path, "--digest"]))
        .await
        .unwrap();
    navgraph::run(args(&[
        "navgraph",
        "path",
        "--graph",
        &path,
        "--target",
        "menu",
        "--alternatives",
        "--format",
        "json",
    ]))
    .await
    .unwrap();
    navgraph::run(args(&["navgraph", "check", "--graph", &path]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_run_reports_unreachable_with_reason() {
    let file = graph_file();
    let path = file.path().to_string_lossy().to_string();

    let err = navgraph::run(args(&[
        "navgraph", "path", "--graph", &path, "--target", "island",
    ]))
    .await
    .unwrap_err();

    let text = format!("{err:#}");
    assert!(text.contains("[unreachable]"), "got: {text}");
    assert!(text.contains("\"same_component\":false"), "got: {text}");
}

#[tokio::test]
async fn test_run_reports_unknown_reachable_start() {
    let file = graph_file();
    let path = file.path().to_string_lossy().to_string();

    let err = navgraph::run(args(&["navgraph", "reachable", "--graph", &path, "--from", "nope"]))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("[node_not_found]"));
}

#[tokio::test]
async fn test_run_rejects_missing_graph_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let missing = missing.to_string_lossy().to_string();

    let err = navgraph::run(args(&["navgraph", "check", "--graph", &missing]))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("loading graph definition"));
}

#[tokio::test]
async fn test_expired_budget_abandons_planning() {
    let err = navgraph::with_budget(Some(1), || {
        std::thread::sleep(Duration::from_millis(300));
        Ok(42)
    })
    .await
    .unwrap_err();

    assert!(
        format!("{err:#}").contains("planning exceeded the 1ms budget"),
        "got: {err:#}"
    );
}

#[tokio::test]
async fn test_budget_passes_results_and_tags_errors() {
    let value = navgraph::with_budget(Some(10_000), || Ok(7)).await.unwrap();
    assert_eq!(value, 7);

    let unbounded = navgraph::with_budget(None, || Ok("done")).await.unwrap();
    assert_eq!(unbounded, "done");

    let err = navgraph::with_budget(None, || Err::<(), _>(NavError::EmptyGraph))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("[empty_graph]"));
}
