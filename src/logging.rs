// src/logging.rs

//! Structured logging for `mcp-smoke` (`tracing` + `tracing-subscriber`).
//!
//! The filter is picked in this order:
//! 1. `--log-level` on the command line, applied to every target;
//! 2. `MCP_SMOKE_LOG`, which accepts full `EnvFilter` directives
//!    (e.g. `warn,mcp_smoke::exec=debug`);
//! 3. `warn`, so a normal run shows only the console report.
//!
//! Everything is written to STDERR. STDOUT carries the progress lines and the
//! summary.

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MCP_SMOKE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV).ok().as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

/// Resolve the filter from the CLI level and the raw `MCP_SMOKE_LOG` value.
pub fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return Ok(level_filter(level_from_log_level(level)));
    }
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => match parse_level_str(value) {
            Some(level) => Ok(level_filter(level)),
            None => EnvFilter::try_new(value)
                .with_context(|| format!("invalid {LOG_ENV} value `{value}`")),
        },
        None => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

fn level_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
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

/// Parse a bare level name (`"warning"` is accepted for `warn`).
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
