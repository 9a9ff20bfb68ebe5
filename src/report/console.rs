// src/report/console.rs

//! Console rendering. Presentation only; not a machine-readable format.

use std::path::Path;
use std::time::Duration;

use crate::engine::{CheckResult, CheckStatus};

use super::summary::RunSummary;

const RULE_WIDTH: usize = 60;

pub fn banner(title: &str, project_root: &Path, timeout: Duration) -> String {
    [
        title.to_string(),
        "=".repeat(title.chars().count()),
        format!("Project: {}", project_root.display()),
        format!("Timeout: {}ms", timeout.as_millis()),
    ]
    .join("\n")
}

pub fn check_started(name: &str) -> String {
    format!("\n> Testing: {name}")
}

pub fn check_settled(result: &CheckResult) -> String {
    let duration = result.duration_ms.unwrap_or_default();
    match result.status {
        CheckStatus::Passed => format!("  PASSED: {} ({duration}ms)", result.name),
        CheckStatus::Failed => format!(
            "  FAILED: {} ({duration}ms)\n     Error: {}",
            result.name,
            result.error.as_deref().unwrap_or_default()
        ),
        CheckStatus::Skipped => format!(
            "  SKIPPED: {} - {}",
            result.name,
            result.reason.as_deref().unwrap_or_default()
        ),
    }
}

/// Totals, success rate, and every failed check with its message.
pub fn render_summary(title: &str, summary: &RunSummary, results: &[CheckResult]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        title.to_string(),
        rule.clone(),
        format!("Total Tests: {}", summary.total),
        format!("Passed: {}", summary.passed),
        format!("Failed: {}", summary.failed),
        format!("Skipped: {}", summary.skipped),
        format!("Success Rate: {}%", summary.success_rate),
    ];

    let failures: Vec<String> = results
        .iter()
        .filter(|r| r.status == CheckStatus::Failed)
        .map(|r| format!("   - {}: {}", r.name, r.error.as_deref().unwrap_or_default()))
        .collect();
    if !failures.is_empty() {
        lines.push(String::new());
        lines.push("FAILED TESTS:".to_string());
        lines.extend(failures);
    }

    lines.push(rule);
    lines.join("\n")
}
