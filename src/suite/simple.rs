// src/suite/simple.rs

//! Lightweight pass: config files present and parseable, toolchain present,
//! agent accepts the config, global packages installed.

use crate::check::agent::{AgentLoadsConfig, ConfigRejection};
use crate::check::config::{ConfigFilesExist, ConfigFilesParse};
use crate::check::tooling::{CommandSucceeds, GlobalPackagesInstalled};
use crate::check::CheckDescriptor;
use crate::config::HarnessSettings;

pub fn checks(settings: &HarnessSettings) -> Vec<CheckDescriptor> {
    let cfg = &settings.config;
    vec![
        CheckDescriptor::new(
            "Configuration files exist",
            ConfigFilesExist {
                files: cfg.simple_files.clone(),
            },
        ),
        CheckDescriptor::new(
            "Configuration files are valid JSON",
            ConfigFilesParse {
                files: cfg.simple_files.clone(),
                require_servers_key: false,
            },
        ),
        CheckDescriptor::new(
            "Node.js is available",
            CommandSucceeds::new("node", &["--version"], "Node.js not working"),
        ),
        CheckDescriptor::new(
            "npm is available",
            CommandSucceeds::new("npm", &["--version"], "npm not working"),
        ),
        CheckDescriptor::new(
            "npx is available",
            CommandSucceeds::new("npx", &["--version"], "npx not working"),
        ),
        CheckDescriptor::new(
            "Claude Code can parse MCP config",
            AgentLoadsConfig {
                program: settings.agent_command.clone(),
                config: cfg.simple.clone().into(),
                rule: ConfigRejection::ReportsError,
            },
        ),
        CheckDescriptor::new(
            "MCP packages are installed globally",
            GlobalPackagesInstalled {
                packages: settings.packages.global.clone(),
            },
        ),
    ]
}
