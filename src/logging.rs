// src/logging.rs

//! Logging setup for `navgraph` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `NAVGRAPH_LOG` environment variable, either a bare level ("debug") or
//!    `EnvFilter` directives ("warn,navgraph::planner=debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout carries only plan output.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV: &str = "NAVGRAPH_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Resolve the subscriber filter from the CLI flag and the raw
/// `NAVGRAPH_LOG` value.
///
/// Unparseable directives fall back to `info`.
pub fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return EnvFilter::new(level_from_log_level(lvl).as_str());
    }

    let Some(raw) = env_value.map(str::trim).filter(|s| !s.is_empty()) else {
        return EnvFilter::new("info");
    };

    if let Some(level) = parse_level_str(raw) {
        return EnvFilter::new(level.as_str());
    }

    EnvFilter::try_new(raw).unwrap_or_else(|err| {
        eprintln!("navgraph: ignoring invalid {LOG_ENV}={raw:?} ({err}); using info");
        EnvFilter::new("info")
    })
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
