// src/config/mod.rs

//! Configuration for mcp-smoke.
//!
//! Responsibilities:
//! - Define the TOML-backed harness settings (`model.rs`): paths, server
//!   names, packages and timeouts that the suites are built from.
//! - Define the MCP config-file model under test (`mcp.rs`).
//! - Load both from disk (`loader.rs`).
//! - Validate invariants (`validate.rs`).

pub mod loader;
pub mod mcp;
pub mod model;
pub mod validate;

pub use loader::{
    default_settings_path, load_and_validate_settings, load_mcp_config, load_settings_from_path,
    parse_json_file,
};
pub use mcp::{McpConfig, ServerDescriptor, SERVERS_KEY};
pub use model::{
    ConfigFilesSection, HarnessSettings, PackagesSection, RawSettings, ServerPackage,
    TimeoutSection, Timeouts,
};
pub use validate::{validate_required_servers, validate_server_descriptors};
