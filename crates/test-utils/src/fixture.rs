use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use mcp_smoke::config::{HarnessSettings, RawSettings};

/// The six servers the primary config declares by default.
pub const ALL_SERVERS: [&str; 6] = [
    "filesystem",
    "memory",
    "context7",
    "sequential",
    "magic",
    "puppeteer",
];

/// An `mcpServers` document declaring `servers`, each with `command` and
/// `args`.
pub fn mcp_config(servers: &[&str]) -> Value {
    let mut map = serde_json::Map::new();
    for name in servers {
        map.insert(
            name.to_string(),
            json!({ "command": "npx", "args": ["-y", format!("@test/{name}")] }),
        );
    }
    json!({ "mcpServers": Value::Object(map) })
}

/// A throwaway project directory holding MCP config files.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp project dir"),
        }
    }

    /// Every config file the suites look for, all declaring every server,
    /// plus an executable setup script and a memory server directory.
    pub fn complete() -> Self {
        let fixture = Self::empty();
        let full = mcp_config(&ALL_SERVERS);
        for file in [
            "mcp-config.json",
            "mcp-simple.json",
            "mcp-dev.json",
            "mcp-test.json",
            "mcp-ui.json",
        ] {
            fixture.write_json(file, &full);
        }
        fixture.write_script("scripts/setup-mcp-servers.sh", "#!/bin/sh\nexit 0\n");
        fixture.write("memory/build/index.js", "console.log('memory');\n");
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent dir");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        let contents = serde_json::to_string_pretty(value).expect("serialize fixture json");
        self.write(relative, &contents)
    }

    /// Write a file and mark it executable (on Unix).
    pub fn write_script(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.write(relative, contents);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("chmod fixture script");
        }
        path
    }

    /// Settings pointing at this project, with the memory server inside it.
    pub fn settings(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .project_root(self.root())
            .memory_server(self.path("memory/build/index.js"))
    }
}

/// Builder for `HarnessSettings` to simplify test setup.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings::default(),
        }
    }

    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.raw.project_root = root.into();
        self
    }

    pub fn memory_server(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.memory_server = Some(path.into());
        self
    }

    pub fn agent_command(mut self, program: &str) -> Self {
        self.raw.agent_command = program.to_string();
        self
    }

    pub fn timeouts_ms(mut self, default_ms: u64, lightweight_ms: u64, probe_ms: u64) -> Self {
        self.raw.timeouts.default_ms = default_ms;
        self.raw.timeouts.lightweight_ms = lightweight_ms;
        self.raw.timeouts.probe_ms = probe_ms;
        self
    }

    pub fn raw(self) -> RawSettings {
        self.raw
    }

    pub fn build(self) -> HarnessSettings {
        HarnessSettings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
