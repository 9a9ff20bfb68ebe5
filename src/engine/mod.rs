// src/engine/mod.rs

//! Orchestration engine for mcp-smoke.
//!
//! The [`TestRunner`] executes an ordered list of checks strictly one after
//! another and turns each settlement into a [`CheckResult`]. A failing,
//! panicking or hanging-then-killed check never stops the batch.

use serde::{Deserialize, Serialize};

pub mod runner;

pub use runner::TestRunner;

/// Outcome class of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

/// Lifecycle of a [`TestRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Completed,
}

/// Record of one settled check.
///
/// `duration_ms` is present for `Passed`/`Failed`, `error` only for `Failed`,
/// `reason` only for `Skipped`. Use the constructors to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckResult {
    pub fn passed(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Passed,
            duration_ms: Some(duration_ms),
            error: None,
            reason: None,
        }
    }

    /// An empty `error` is replaced so that every failure carries a message.
    pub fn failed(name: impl Into<String>, duration_ms: u64, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "check failed without a message".to_string();
        }
        Self {
            name: name.into(),
            status: CheckStatus::Failed,
            duration_ms: Some(duration_ms),
            error: Some(error),
            reason: None,
        }
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Skipped,
            duration_ms: None,
            error: None,
            reason: Some(reason.into()),
        }
    }
}
