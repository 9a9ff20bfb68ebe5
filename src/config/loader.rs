// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::mcp::McpConfig;
use crate::config::model::{HarnessSettings, RawSettings};
use crate::errors::{Result, SmokeError};

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate_settings`] for that.
pub fn load_settings_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load harness settings and validate them.
///
/// - `Some(path)`: the file must exist.
/// - `None`: [`default_settings_path`] is used if it exists, otherwise the
///   built-in defaults.
pub fn load_and_validate_settings(path: Option<&Path>) -> Result<HarnessSettings> {
    let raw = match path {
        Some(path) => load_settings_from_path(path)?,
        None => {
            let default_path = default_settings_path();
            if default_path.is_file() {
                debug!(path = %default_path.display(), "using settings file from working directory");
                load_settings_from_path(&default_path)?
            } else {
                RawSettings::default()
            }
        }
    };
    HarnessSettings::try_from(raw)
}

/// Default settings file looked up in the current working directory.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("mcp-smoke.toml")
}

/// Read and parse an MCP config file, requiring the `mcpServers` key.
pub fn load_mcp_config(path: impl AsRef<Path>) -> Result<McpConfig> {
    let path = path.as_ref();
    let source = display_name(path);
    let contents = fs::read_to_string(path)
        .map_err(|e| SmokeError::Config(format!("cannot read {source}: {e}")))?;
    McpConfig::from_json_str(&contents, &source)
}

/// Read a file and check it is well-formed JSON, without interpreting it.
pub fn parse_json_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let source = display_name(path);
    let contents = fs::read_to_string(path)
        .map_err(|e| SmokeError::Config(format!("cannot read {source}: {e}")))?;
    serde_json::from_str(&contents)
        .map_err(|e| SmokeError::Config(format!("invalid JSON in {source}: {e}")))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
