// src/suite/functional.rs

//! Local filesystem round-trips, in-depth config validation, package and
//! agent checks.

use std::path::PathBuf;
use std::sync::Arc;

use crate::check::agent::{AgentAvailable, AgentLoadsConfig, ConfigRejection};
use crate::check::config::RequiredServers;
use crate::check::filesystem::{DirectoryListing, FileRoundTrip, ScratchDirectory};
use crate::check::tooling::{CommandSucceeds, PackageProbe};
use crate::check::{Check, CheckDescriptor, Sequence};
use crate::config::HarnessSettings;

/// Scratch directory created and removed under the project root.
pub const SCRATCH_DIR: &str = "test-tmp";
/// Scratch file written, read back and removed under the project root.
pub const SCRATCH_FILE: &str = "test-file.txt";
pub const SCRATCH_CONTENT: &str = "MCP Test Content";

pub fn checks(settings: &HarnessSettings) -> Vec<CheckDescriptor> {
    let cfg = &settings.config;
    let memory_dir = settings
        .memory_server
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();

    let npm: Arc<dyn Check> =
        Arc::new(CommandSucceeds::new("npm", &["--version"], "npm not working"));
    let npx: Arc<dyn Check> =
        Arc::new(CommandSucceeds::new("npx", &["--version"], "npx not working"));

    vec![
        CheckDescriptor::new(
            "Filesystem: Test Directory Creation",
            ScratchDirectory {
                dir: SCRATCH_DIR.into(),
            },
        ),
        CheckDescriptor::new(
            "Filesystem: Test File Operations",
            FileRoundTrip {
                file: SCRATCH_FILE.into(),
                content: SCRATCH_CONTENT.to_string(),
            },
        ),
        CheckDescriptor::new(
            "Memory: Test Basic Memory Operations",
            DirectoryListing {
                dir: memory_dir,
                what: "Memory server".to_string(),
            },
        ),
        CheckDescriptor::new(
            "Configuration: Validate MCP Config Structure",
            RequiredServers {
                file: cfg.primary.clone(),
                servers: cfg.core_servers.clone(),
                check_descriptors: true,
            },
        ),
        CheckDescriptor::new(
            "Configuration: Validate Simple Config",
            RequiredServers {
                file: cfg.simple.clone(),
                servers: cfg.core_servers.clone(),
                check_descriptors: false,
            },
        ),
        CheckDescriptor::new(
            "Package: Test Node.js Package Manager",
            Sequence::new(vec![npm, npx]),
        ),
        CheckDescriptor::new(
            "Package: Test MCP Filesystem Package",
            PackageProbe {
                package: settings.packages.filesystem.clone(),
                timeout: settings.timeouts.probe,
            },
        ),
        CheckDescriptor::new(
            "Claude Code: Test Basic Integration",
            AgentAvailable {
                program: settings.agent_command.clone(),
            },
        ),
        CheckDescriptor::new(
            "Claude Code: Test MCP Config Loading",
            AgentLoadsConfig {
                program: settings.agent_command.clone(),
                config: cfg.simple.clone().into(),
                rule: ConfigRejection::ReportsError,
            },
        ),
    ]
}
