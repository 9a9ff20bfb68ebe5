// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! [`SmokeError`] covers everything that aborts a run (fatal orchestration
//! errors). Failures *inside* a check are [`crate::check::CheckError`] and
//! never escape the runner.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SmokeError>;
