// src/lib.rs

pub mod check;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod report;
pub mod suite;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::check::CheckContext;
use crate::cli::CliArgs;
use crate::config::{load_and_validate_settings, HarnessSettings};
use crate::engine::{CheckResult, TestRunner};
use crate::errors::{Result, SmokeError};
use crate::exec::{duration_millis, ProcessBackend, RealProcessBackend};
use crate::report::{console, persist, summarize, Environment, PersistedReport, RunSummary};
use crate::suite::{build_suite, Suite};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub results: Vec<CheckResult>,
    pub summary: RunSummary,
    pub report_path: PathBuf,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }
}

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - settings loading and CLI overrides
/// - suite construction
/// - the real process backend
/// - Ctrl-C handling
/// - runner, reporter, console output
pub async fn run(args: CliArgs) -> Result<i32> {
    let settings = resolve_settings(&args)?;
    let kind = args.suite.unwrap_or(settings.default_suite);
    let suite = configure_suite(build_suite(kind, &settings), &args)?;

    if args.list {
        print_check_list(&suite);
        return Ok(0);
    }

    // Ctrl-C -> stop after the current check, report what we have.
    let interrupt = Arc::new(Notify::new());
    {
        let interrupt = Arc::clone(&interrupt);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            interrupt.notify_one();
        });
    }

    let backend: Arc<dyn ProcessBackend> = Arc::new(RealProcessBackend::new());
    let report = execute_suite(suite, &settings.project_root, backend, interrupt, true).await?;
    Ok(report.exit_code())
}

fn resolve_settings(args: &CliArgs) -> Result<HarnessSettings> {
    let mut settings = load_and_validate_settings(args.settings.as_deref().map(Path::new))?;
    if let Some(root) = &args.project_root {
        settings.project_root = PathBuf::from(root);
    }
    debug!(?settings, "harness settings resolved");
    Ok(settings)
}

fn configure_suite(mut suite: Suite, args: &CliArgs) -> Result<Suite> {
    if let Some(ms) = args.timeout_ms {
        if ms == 0 {
            return Err(SmokeError::Settings(
                "--timeout-ms must be >= 1 (got 0)".to_string(),
            ));
        }
        suite.timeout = Duration::from_millis(ms);
    }
    if let Some(report) = &args.report {
        suite.report_path = PathBuf::from(report);
    }
    Ok(suite)
}

/// Run a suite end to end: checks, summary, persisted report, console
/// summary.
///
/// Check failures never surface here; only fatal problems (such as the report
/// not being writable) return `Err`, in which case no report exists.
pub async fn execute_suite(
    suite: Suite,
    project_root: &Path,
    backend: Arc<dyn ProcessBackend>,
    interrupt: Arc<Notify>,
    console_output: bool,
) -> Result<RunReport> {
    if console_output {
        println!("{}", console::banner(suite.title, project_root, suite.timeout));
    }
    info!(
        suite = %suite.kind,
        checks = suite.checks.len(),
        timeout_ms = duration_millis(suite.timeout),
        "running suite"
    );

    let ctx = Arc::new(CheckContext::new(project_root, suite.timeout, backend));
    let mut runner = TestRunner::new(ctx)
        .with_interrupt(interrupt)
        .with_console(console_output);
    let results = runner.run_all(suite.checks).await;

    let summary = summarize(&results);
    let report = PersistedReport::new(
        Utc::now(),
        suite.report_type,
        summary,
        results.clone(),
        Environment::capture(project_root),
    );
    persist(&report, &suite.report_path)?;

    if console_output {
        println!("\nReport saved to: {}", suite.report_path.display());
        println!("{}", console::render_summary(suite.title, &summary, &results));
    }

    Ok(RunReport {
        results,
        summary,
        report_path: suite.report_path,
    })
}

/// `--list` output: the suite's checks in execution order.
fn print_check_list(suite: &Suite) {
    println!("mcp-smoke {} suite ({} checks)", suite.kind, suite.checks.len());
    println!("  timeout: {}ms", suite.timeout.as_millis());
    println!("  report: {}", suite.report_path.display());
    println!();
    for (idx, name) in suite.check_names().enumerate() {
        println!("  {:>2}. {name}", idx + 1);
    }
}
