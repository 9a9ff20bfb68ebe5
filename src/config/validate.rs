// src/config/validate.rs

use crate::config::mcp::McpConfig;
use crate::config::model::{default_memory_server_path, HarnessSettings, RawSettings};
use crate::errors::{Result, SmokeError};

impl TryFrom<RawSettings> for HarnessSettings {
    type Error = crate::errors::SmokeError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        let memory_server = raw
            .memory_server
            .clone()
            .unwrap_or_else(default_memory_server_path);
        Ok(HarnessSettings::new_unchecked(raw, memory_server))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_timeouts(raw)?;
    validate_agent(raw)?;
    validate_file_names(raw)?;
    validate_packages(raw)?;
    Ok(())
}

fn validate_timeouts(raw: &RawSettings) -> Result<()> {
    let t = &raw.timeouts;
    for (key, value) in [
        ("default_ms", t.default_ms),
        ("lightweight_ms", t.lightweight_ms),
        ("probe_ms", t.probe_ms),
    ] {
        if value == 0 {
            return Err(SmokeError::Settings(format!(
                "[timeouts].{key} must be >= 1 (got 0)"
            )));
        }
    }
    Ok(())
}

fn validate_agent(raw: &RawSettings) -> Result<()> {
    if raw.agent_command.trim().is_empty() {
        return Err(SmokeError::Settings(
            "agent_command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_file_names(raw: &RawSettings) -> Result<()> {
    let cfg = &raw.config;
    let named = cfg
        .files
        .iter()
        .chain(cfg.simple_files.iter())
        .chain([&cfg.primary, &cfg.simple]);
    if named.into_iter().any(|name| name.trim().is_empty()) {
        return Err(SmokeError::Settings(
            "[config] file names must not be empty".to_string(),
        ));
    }

    let servers = cfg.required_servers.iter().chain(cfg.core_servers.iter());
    if servers.into_iter().any(|name| name.trim().is_empty()) {
        return Err(SmokeError::Settings(
            "[config] server names must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_packages(raw: &RawSettings) -> Result<()> {
    let pkgs = &raw.packages;
    if pkgs.filesystem.trim().is_empty() {
        return Err(SmokeError::Settings(
            "[packages].filesystem must not be empty".to_string(),
        ));
    }
    for server in pkgs.additional.iter() {
        if server.label.trim().is_empty() || server.package.trim().is_empty() {
            return Err(SmokeError::Settings(format!(
                "[[packages.additional]] entries need a label and a package (got label '{}', package '{}')",
                server.label, server.package
            )));
        }
    }
    if pkgs.global.iter().any(|p| p.trim().is_empty()) {
        return Err(SmokeError::Settings(
            "[packages].global entries must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Every name in `required` must be declared in `cfg`.
pub fn validate_required_servers(cfg: &McpConfig, source: &str, required: &[String]) -> Result<()> {
    for server in required {
        if !cfg.has_server(server) {
            return Err(SmokeError::Config(format!(
                "missing server configuration: {server} in {source}"
            )));
        }
    }
    Ok(())
}

/// Every declared server must have a non-empty string `command` and an
/// `args` array.
pub fn validate_server_descriptors(cfg: &McpConfig, source: &str) -> Result<()> {
    for (name, descriptor) in cfg.servers.iter() {
        let has_command = descriptor.command_str().is_some_and(|c| !c.is_empty());
        if !has_command {
            return Err(SmokeError::Config(format!(
                "missing command for {name} server in {source}"
            )));
        }
        if !descriptor.args.as_ref().is_some_and(|a| a.is_array()) {
            return Err(SmokeError::Config(format!(
                "missing args for {name} server in {source}"
            )));
        }
    }
    Ok(())
}
