// src/check/heuristics.rs

//! Output predicates used by the process-backed checks.
//!
//! These are substring matches on free-form tool output. They are kept
//! exactly as they are (including their blind spots) because the checks'
//! behaviour is defined by them.

use crate::exec::ProcessOutcome;

/// The process exited with code 0.
pub fn exited_cleanly(outcome: &ProcessOutcome) -> bool {
    outcome.success()
}

/// npm/npx could not resolve the package: stderr mentions `not found` or
/// `404`. Applies regardless of the exit code.
pub fn reports_missing_package(outcome: &ProcessOutcome) -> bool {
    outcome.stderr.contains("not found") || outcome.stderr.contains("404")
}

/// A node script failed to load one of its dependencies.
pub fn reports_missing_module(outcome: &ProcessOutcome) -> bool {
    outcome.stderr.contains("Error: Cannot find module")
}

/// The agent refused its MCP config: nonzero exit *and* stderr mentions
/// `config`.
pub fn rejects_config(outcome: &ProcessOutcome) -> bool {
    !outcome.success() && outcome.stderr.contains("config")
}

/// The agent printed an error while loading its MCP config: stderr contains
/// `Invalid` or `Error`, whatever the exit code.
pub fn reports_config_error(outcome: &ProcessOutcome) -> bool {
    outcome.stderr.contains("Invalid") || outcome.stderr.contains("Error")
}
