// src/report/artifact.rs

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::summary::RunSummary;
use crate::engine::CheckResult;
use crate::errors::{Result, SmokeError};

/// The JSON document written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedReport {
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    pub summary: RunSummary,
    pub results: Vec<CheckResult>,
    pub environment: Environment,
}

impl PersistedReport {
    pub fn new(
        generated_at: DateTime<Utc>,
        report_type: Option<&str>,
        summary: RunSummary,
        results: Vec<CheckResult>,
        environment: Environment,
    ) -> Self {
        Self {
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            report_type: report_type.map(str::to_string),
            summary,
            results,
            environment,
        }
    }
}

/// Where the run happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub runtime_version: String,
    pub platform: String,
    pub arch: String,
    pub project_root: String,
}

impl Environment {
    pub fn capture(project_root: &Path) -> Self {
        let root = fs::canonicalize(project_root).unwrap_or_else(|_| project_root.to_path_buf());
        Self {
            runtime_version: format!("mcp-smoke {}", env!("CARGO_PKG_VERSION")),
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            project_root: root.display().to_string(),
        }
    }
}

/// Write `report` as pretty JSON to `path`, creating parent directories and
/// replacing any existing file.
pub fn persist(report: &PersistedReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| SmokeError::Report {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| SmokeError::Report {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), results = report.results.len(), "report written");
    Ok(())
}
