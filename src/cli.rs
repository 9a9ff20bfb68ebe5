// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::SuiteKind;

/// Command-line arguments for `mcp-smoke`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mcp-smoke",
    version,
    about = "Smoke-test MCP server configurations and their companion tools.",
    long_about = None
)]
pub struct CliArgs {
    /// Which battery of checks to run.
    ///
    /// If omitted, `default_suite` from the settings file is used
    /// (itself defaulting to `server`).
    #[arg(long, value_enum, value_name = "SUITE")]
    pub suite: Option<SuiteKind>,

    /// Path to a harness settings file (TOML).
    ///
    /// Default: `mcp-smoke.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<String>,

    /// Directory containing the MCP config files; overrides `project_root`.
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<String>,

    /// Per-command timeout in milliseconds; overrides the suite default.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Where to write the JSON report; overrides the suite default.
    #[arg(long, value_name = "PATH")]
    pub report: Option<String>,

    /// Print the checks of the selected suite and exit without running them.
    #[arg(long)]
    pub list: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MCP_SMOKE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
