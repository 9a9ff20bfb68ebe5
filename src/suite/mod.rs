// src/suite/mod.rs

//! The check batteries.
//!
//! Each suite is a fixed, ordered list of [`CheckDescriptor`]s built from
//! [`HarnessSettings`], plus the metadata the run needs (title, command
//! timeout, report location and type tag). All three share the same runner
//! and reporter.

use std::path::PathBuf;
use std::time::Duration;

use crate::check::CheckDescriptor;
use crate::config::HarnessSettings;
use crate::types::SuiteKind;

pub mod functional;
pub mod server;
pub mod simple;

/// A ready-to-run battery.
#[derive(Debug, Clone)]
pub struct Suite {
    pub kind: SuiteKind,
    pub title: &'static str,
    pub checks: Vec<CheckDescriptor>,
    /// Default per-command timeout handed to every check.
    pub timeout: Duration,
    pub report_path: PathBuf,
    /// Optional `type` tag in the persisted report.
    pub report_type: Option<&'static str>,
}

impl Suite {
    pub fn check_names(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|c| c.name.as_str())
    }
}

/// Build the suite of the given kind.
pub fn build_suite(kind: SuiteKind, settings: &HarnessSettings) -> Suite {
    let reports_dir = settings.resolve(&settings.reports_dir);
    match kind {
        SuiteKind::Server => Suite {
            kind,
            title: "MCP Server Test Suite",
            checks: server::checks(settings),
            timeout: settings.timeouts.default,
            report_path: reports_dir.join("mcp-test-report.json"),
            report_type: None,
        },
        SuiteKind::Functional => Suite {
            kind,
            title: "MCP Functional Test Suite",
            checks: functional::checks(settings),
            timeout: settings.timeouts.default,
            report_path: reports_dir.join("mcp-functional-test-report.json"),
            report_type: Some("functional-tests"),
        },
        SuiteKind::Simple => Suite {
            kind,
            title: "Simple MCP Test Suite",
            checks: simple::checks(settings),
            timeout: settings.timeouts.lightweight,
            report_path: reports_dir.join("mcp-simple-test-report.json"),
            report_type: Some("simple-tests"),
        },
    }
}
