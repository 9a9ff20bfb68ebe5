// src/suite/server.rs

//! Configuration, dependency, server-package, setup-script and agent checks.

use crate::check::agent::{AgentAvailable, AgentLoadsConfig, ConfigRejection};
use crate::check::config::{ConfigFilesExist, ConfigFilesParse, RequiredServers};
use crate::check::filesystem::{PathExists, ScriptExecutable};
use crate::check::tooling::{CommandSucceeds, PackageResolvable, ScriptLoads};
use crate::check::CheckDescriptor;
use crate::config::HarnessSettings;

pub fn checks(settings: &HarnessSettings) -> Vec<CheckDescriptor> {
    let cfg = &settings.config;
    let mut checks = vec![
        CheckDescriptor::new(
            "Configuration Files Exist",
            ConfigFilesExist {
                files: cfg.files.clone(),
            },
        ),
        CheckDescriptor::new(
            "Configuration Files Valid JSON",
            ConfigFilesParse {
                files: cfg.files.clone(),
                require_servers_key: true,
            },
        ),
        CheckDescriptor::new(
            "MCP Server Configurations",
            RequiredServers {
                file: cfg.primary.clone(),
                servers: cfg.required_servers.clone(),
                check_descriptors: false,
            },
        ),
        CheckDescriptor::new(
            "Node.js Available",
            CommandSucceeds::new("node", &["--version"], "Node.js not available"),
        ),
        CheckDescriptor::new(
            "npm Available",
            CommandSucceeds::new("npm", &["--version"], "npm not available"),
        ),
        CheckDescriptor::new(
            "npx Available",
            CommandSucceeds::new("npx", &["--version"], "npx not available"),
        ),
        CheckDescriptor::new(
            "Filesystem Server Package",
            CommandSucceeds::new(
                "npx",
                &["-y", settings.packages.filesystem.as_str(), "--help"],
                "Filesystem server package not available",
            ),
        ),
        CheckDescriptor::new(
            "Memory Server Path",
            PathExists {
                path: settings.memory_server.clone(),
                what: "Memory server".to_string(),
            },
        ),
        CheckDescriptor::new(
            "Memory Server Executable",
            ScriptLoads {
                script: settings.memory_server.clone(),
                failure: "Memory server has missing dependencies".to_string(),
            },
        ),
    ];

    for server in settings.packages.additional.iter() {
        checks.push(CheckDescriptor::new(
            format!("{} Server Package", server.label),
            PackageResolvable {
                label: server.label.clone(),
                package: server.package.clone(),
            },
        ));
    }

    checks.extend([
        CheckDescriptor::new(
            "MCP Setup Script Exists",
            PathExists {
                path: settings.setup_script.clone(),
                what: "MCP setup script".to_string(),
            },
        ),
        CheckDescriptor::new(
            "MCP Setup Script Executable",
            ScriptExecutable {
                path: settings.setup_script.clone(),
            },
        ),
        CheckDescriptor::new(
            "Claude Code Executable",
            AgentAvailable {
                program: settings.agent_command.clone(),
            },
        ),
        CheckDescriptor::new(
            "Claude Code MCP Config",
            AgentLoadsConfig {
                program: settings.agent_command.clone(),
                config: cfg.simple.clone().into(),
                rule: ConfigRejection::NonZeroMentionsConfig,
            },
        ),
    ]);

    checks
}
