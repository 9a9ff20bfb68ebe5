// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::exec::{duration_millis, DEFAULT_TIMEOUT, LIGHTWEIGHT_TIMEOUT};
use crate::types::SuiteKind;

/// Harness settings as read from a TOML file.
///
/// Every field is optional; the defaults reproduce the stock MCP project
/// layout:
///
/// ```toml
/// default_suite = "server"
/// project_root = "."
/// agent_command = "claude-code"
///
/// [config]
/// files = ["mcp-config.json", "mcp-simple.json", "mcp-dev.json", "mcp-test.json"]
/// required_servers = ["filesystem", "memory", "context7", "sequential", "magic", "puppeteer"]
///
/// [[packages.additional]]
/// label = "Context7"
/// package = "@context7/mcp-server"
///
/// [timeouts]
/// default_ms = 30000
/// ```
///
/// This is only deserialized; use [`HarnessSettings`] (via `TryFrom`) for a
/// validated view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    /// Suite used when `--suite` is not given.
    pub default_suite: SuiteKind,

    /// Directory holding the MCP config files. Relative paths elsewhere in
    /// these settings resolve against it.
    pub project_root: PathBuf,

    /// Where reports are written.
    pub reports_dir: PathBuf,

    /// Coding-agent CLI executable.
    pub agent_command: String,

    /// Entry point of the locally built memory server.
    ///
    /// If `None`, `$HOME/.config/mcp-memory-server/build/index.js`.
    pub memory_server: Option<PathBuf>,

    /// Setup script that must exist and be executable.
    pub setup_script: PathBuf,

    /// `[config]` section.
    pub config: ConfigFilesSection,

    /// `[packages]` section.
    pub packages: PackagesSection,

    /// `[timeouts]` section.
    pub timeouts: TimeoutSection,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            default_suite: SuiteKind::default(),
            project_root: PathBuf::from("."),
            reports_dir: PathBuf::from("reports"),
            agent_command: "claude-code".to_string(),
            memory_server: None,
            setup_script: PathBuf::from("scripts/setup-mcp-servers.sh"),
            config: ConfigFilesSection::default(),
            packages: PackagesSection::default(),
            timeouts: TimeoutSection::default(),
        }
    }
}

/// `[config]` section: which MCP config files exist and what they contain.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFilesSection {
    /// Files the server suite expects (and requires `mcpServers` in).
    pub files: Vec<String>,

    /// Files the simple suite expects (parse-only).
    pub simple_files: Vec<String>,

    /// The full config, checked for every required server.
    pub primary: String,

    /// The minimal config, checked for the core servers.
    pub simple: String,

    /// Servers the primary config must declare.
    pub required_servers: Vec<String>,

    /// Servers every config must declare at minimum.
    pub core_servers: Vec<String>,
}

impl Default for ConfigFilesSection {
    fn default() -> Self {
        let files = vec![
            "mcp-config.json".to_string(),
            "mcp-simple.json".to_string(),
            "mcp-dev.json".to_string(),
            "mcp-test.json".to_string(),
        ];
        let mut simple_files = files.clone();
        simple_files.push("mcp-ui.json".to_string());

        Self {
            files,
            simple_files,
            primary: "mcp-config.json".to_string(),
            simple: "mcp-simple.json".to_string(),
            required_servers: [
                "filesystem",
                "memory",
                "context7",
                "sequential",
                "magic",
                "puppeteer",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            core_servers: vec!["filesystem".to_string(), "memory".to_string()],
        }
    }
}

/// `[packages]` section: npm packages probed by the suites.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagesSection {
    /// Package that provides the filesystem server.
    pub filesystem: String,

    /// Additional server packages, probed via `npx` with an `npm -g`
    /// fallback.
    pub additional: Vec<ServerPackage>,

    /// Packages that must be installed globally (`npm list -g`).
    pub global: Vec<String>,
}

impl Default for PackagesSection {
    fn default() -> Self {
        Self {
            filesystem: "@modelcontextprotocol/server-filesystem".to_string(),
            additional: vec![
                ServerPackage::new("Context7", "@context7/mcp-server"),
                ServerPackage::new("Sequential", "@sequential/mcp-server"),
                ServerPackage::new("Magic", "@magic/mcp-server"),
                ServerPackage::new("Puppeteer", "@puppeteer/mcp-server"),
            ],
            global: vec![
                "@modelcontextprotocol/server-memory".to_string(),
                "@modelcontextprotocol/server-sequential-thinking".to_string(),
                "@magicuidesign/mcp".to_string(),
                "@upstash/context7-mcp".to_string(),
            ],
        }
    }
}

/// A server package and the label used in check names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerPackage {
    pub label: String,
    pub package: String,
}

impl ServerPackage {
    pub fn new(label: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            package: package.into(),
        }
    }
}

/// `[timeouts]` section, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutSection {
    /// Per-command timeout for the server and functional suites.
    pub default_ms: u64,

    /// Per-command timeout for the simple suite.
    pub lightweight_ms: u64,

    /// Timeout for the functional suite's package probe.
    pub probe_ms: u64,
}

impl Default for TimeoutSection {
    fn default() -> Self {
        Self {
            default_ms: duration_millis(DEFAULT_TIMEOUT),
            lightweight_ms: duration_millis(LIGHTWEIGHT_TIMEOUT),
            probe_ms: duration_millis(LIGHTWEIGHT_TIMEOUT),
        }
    }
}

/// Validated timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub default: Duration,
    pub lightweight: Duration,
    pub probe: Duration,
}

/// Validated harness settings.
///
/// Built from [`RawSettings`] via `TryFrom` (see `validate.rs`). This is what
/// suite construction consumes; nothing downstream reads globals.
#[derive(Debug, Clone)]
pub struct HarnessSettings {
    pub default_suite: SuiteKind,
    pub project_root: PathBuf,
    pub reports_dir: PathBuf,
    pub agent_command: String,
    pub memory_server: PathBuf,
    pub setup_script: PathBuf,
    pub config: ConfigFilesSection,
    pub packages: PackagesSection,
    pub timeouts: Timeouts,
}

impl HarnessSettings {
    /// Construct without validation. Prefer `HarnessSettings::try_from`.
    pub(crate) fn new_unchecked(raw: RawSettings, memory_server: PathBuf) -> Self {
        Self {
            default_suite: raw.default_suite,
            project_root: raw.project_root,
            reports_dir: raw.reports_dir,
            agent_command: raw.agent_command,
            memory_server,
            setup_script: raw.setup_script,
            config: raw.config,
            packages: raw.packages,
            timeouts: Timeouts {
                default: Duration::from_millis(raw.timeouts.default_ms),
                lightweight: Duration::from_millis(raw.timeouts.lightweight_ms),
                probe: Duration::from_millis(raw.timeouts.probe_ms),
            },
        }
    }

    /// Resolve a path against `project_root` (absolute paths pass through).
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self::new_unchecked(RawSettings::default(), default_memory_server_path())
    }
}

/// `$HOME/.config/mcp-memory-server/build/index.js`, or the same path relative
/// to the working directory when `HOME` is unset.
pub fn default_memory_server_path() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default();
    base.join(".config")
        .join("mcp-memory-server")
        .join("build")
        .join("index.js")
}
