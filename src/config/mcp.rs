// src/config/mcp.rs

//! The MCP config-file shape under test.
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "filesystem": { "command": "npx", "args": ["-y", "@modelcontextprotocol/server-filesystem", "."] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::errors::{Result, SmokeError};

/// Top-level key holding the server map.
pub const SERVERS_KEY: &str = "mcpServers";

/// One entry under `mcpServers`.
///
/// Fields are kept as raw JSON: parsing never rejects a descriptor, only
/// `validate_server_descriptors` looks at their types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDescriptor {
    pub command: Option<Value>,
    pub args: Option<Value>,
}

impl ServerDescriptor {
    fn from_entry(entry: Value) -> Self {
        match entry {
            Value::Object(mut fields) => Self {
                command: fields.remove("command").filter(|v| !v.is_null()),
                args: fields.remove("args").filter(|v| !v.is_null()),
            },
            _ => Self::default(),
        }
    }

    /// `command` when it is a string.
    pub fn command_str(&self) -> Option<&str> {
        self.command.as_ref().and_then(Value::as_str)
    }
}

/// A parsed MCP config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McpConfig {
    /// Server name -> descriptor, from `mcpServers`.
    pub servers: BTreeMap<String, ServerDescriptor>,
}

impl McpConfig {
    /// Parse the contents of a config file. `source` names the file in error
    /// messages.
    pub fn from_json_str(contents: &str, source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)
            .map_err(|e| SmokeError::Config(format!("invalid JSON in {source}: {e}")))?;
        Self::from_value(value, source)
    }

    pub fn from_value(value: Value, source: &str) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(SmokeError::Config(format!(
                "{source}: top-level JSON value must be an object"
            )));
        };

        let servers = match root.remove(SERVERS_KEY) {
            None | Some(Value::Null) => {
                return Err(SmokeError::Config(format!(
                    "{source} is missing required key `{SERVERS_KEY}`"
                )));
            }
            Some(servers) => servers,
        };

        let Value::Object(entries) = servers else {
            return Err(SmokeError::Config(format!(
                "{source}: `{SERVERS_KEY}` must be an object"
            )));
        };

        Ok(Self {
            servers: descriptors(entries),
        })
    }

    pub fn has_server(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    pub fn server_names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }
}

fn descriptors(entries: Map<String, Value>) -> BTreeMap<String, ServerDescriptor> {
    entries
        .into_iter()
        .map(|(name, entry)| (name, ServerDescriptor::from_entry(entry)))
        .collect()
}
