// src/check/config.rs

//! Direct-assertion checks over the MCP config files.

use std::sync::Arc;

use tracing::debug;

use super::{Check, CheckContext, CheckError, CheckFuture, Verdict};
use crate::config::{
    load_mcp_config, parse_json_file, validate_required_servers, validate_server_descriptors,
};

/// Every listed file exists under the project root.
#[derive(Debug, Clone)]
pub struct ConfigFilesExist {
    pub files: Vec<String>,
}

impl Check for ConfigFilesExist {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let files = self.files.clone();
        Box::pin(async move {
            for file in files.iter() {
                if !ctx.resolve(file).exists() {
                    return Err(CheckError::assertion(format!(
                        "Configuration file not found: {file}"
                    )));
                }
            }
            Ok(Verdict::Pass)
        })
    }
}

/// Every listed file parses as JSON. With `require_servers_key`, each must
/// also carry a well-formed `mcpServers` map.
#[derive(Debug, Clone)]
pub struct ConfigFilesParse {
    pub files: Vec<String>,
    pub require_servers_key: bool,
}

impl Check for ConfigFilesParse {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let files = self.files.clone();
        let require_servers_key = self.require_servers_key;
        Box::pin(async move {
            for file in files.iter() {
                let path = ctx.resolve(file);
                if require_servers_key {
                    let cfg = load_mcp_config(&path)?;
                    debug!(file = %file, servers = cfg.servers.len(), "config parsed");
                } else {
                    parse_json_file(&path)?;
                }
            }
            Ok(Verdict::Pass)
        })
    }
}

/// A single config file declares every server in `servers`; optionally every
/// declared server must have `command` and `args`.
#[derive(Debug, Clone)]
pub struct RequiredServers {
    pub file: String,
    pub servers: Vec<String>,
    pub check_descriptors: bool,
}

impl Check for RequiredServers {
    fn run(&self, ctx: Arc<CheckContext>) -> CheckFuture {
        let this = self.clone();
        Box::pin(async move {
            let path = ctx.resolve(&this.file);
            if !path.exists() {
                return Err(CheckError::assertion(format!("{} not found", this.file)));
            }

            let cfg = load_mcp_config(&path)?;
            validate_required_servers(&cfg, &this.file, &this.servers)?;
            if this.check_descriptors {
                validate_server_descriptors(&cfg, &this.file)?;
            }

            debug!(
                file = %this.file,
                servers = ?cfg.server_names().collect::<Vec<_>>(),
                "server configuration complete"
            );
            Ok(Verdict::Pass)
        })
    }
}
