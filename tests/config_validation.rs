// tests/config_validation.rs

mod common;
use crate::common::{context, init_tracing, with_timeout, FakeProcessBackend, ProjectFixture};

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use mcp_smoke::check::config::{ConfigFilesExist, ConfigFilesParse, RequiredServers};
use mcp_smoke::check::{Check, CheckError, Verdict};
use mcp_smoke::config::{
    load_and_validate_settings, load_mcp_config, validate_required_servers,
    validate_server_descriptors, HarnessSettings, McpConfig, RawSettings,
};
use mcp_smoke::errors::SmokeError;
use mcp_smoke::types::SuiteKind;
use mcp_smoke_test_utils::fixture::{mcp_config, ALL_SERVERS};

fn core_servers() -> Vec<String> {
    vec!["filesystem".to_string(), "memory".to_string()]
}

#[test]
fn missing_servers_key_is_named_in_the_error() {
    let err = McpConfig::from_json_str(r#"{"servers": {}}"#, "mcp-config.json").unwrap_err();
    match err {
        SmokeError::Config(msg) => {
            assert!(msg.contains("mcpServers"), "unexpected message: {msg}");
            assert!(msg.contains("mcp-config.json"));
        }
        other => panic!("Expected Config error, got: {:?}", other),
    }
}

#[test]
fn invalid_json_names_the_file() {
    let err = McpConfig::from_json_str("{ not json", "mcp-dev.json").unwrap_err();
    assert!(err.to_string().contains("invalid JSON in mcp-dev.json"));
}

#[test]
fn parses_server_descriptors() {
    let cfg = McpConfig::from_value(mcp_config(&ALL_SERVERS), "mcp-config.json").unwrap();
    assert_eq!(cfg.servers.len(), 6);
    assert!(cfg.has_server("puppeteer"));
    assert_eq!(cfg.servers["memory"].command_str(), Some("npx"));
}

fn config_with_loose_descriptor() -> serde_json::Value {
    json!({
        "mcpServers": {
            "filesystem": { "command": "npx", "args": ["-y", "@modelcontextprotocol/server-filesystem", "."] },
            "memory": { "command": "node", "args": ["m.js"], "env": { "PORT": 3000 } },
            "extra": { "command": "node", "args": ["x.js", 8080], "disabled": true }
        }
    })
}

#[test]
fn non_string_env_and_args_values_still_parse() {
    let cfg = McpConfig::from_value(config_with_loose_descriptor(), "mcp-config.json").unwrap();

    assert_eq!(cfg.servers.len(), 3);
    validate_required_servers(&cfg, "mcp-config.json", &core_servers()).unwrap();
    validate_server_descriptors(&cfg, "mcp-config.json").unwrap();
}

#[test]
fn non_string_command_fails_descriptor_validation() {
    let cfg = McpConfig::from_value(
        json!({ "mcpServers": { "memory": { "command": 42, "args": [] } } }),
        "mcp-config.json",
    )
    .unwrap();
    let err = validate_server_descriptors(&cfg, "mcp-config.json").unwrap_err();
    assert!(err.to_string().contains("missing command for memory server"));
}

#[tokio::test]
async fn loose_descriptor_passes_parse_and_required_server_checks() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    fixture.write_json("mcp-config.json", &config_with_loose_descriptor());
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let parse = ConfigFilesParse {
        files: vec!["mcp-config.json".to_string()],
        require_servers_key: true,
    };
    assert_eq!(with_timeout(parse.run(ctx.clone())).await.unwrap(), Verdict::Pass);

    let required = RequiredServers {
        file: "mcp-config.json".to_string(),
        servers: core_servers(),
        check_descriptors: false,
    };
    assert_eq!(with_timeout(required.run(ctx)).await.unwrap(), Verdict::Pass);
}

#[test]
fn missing_required_server_is_reported_by_name() {
    let cfg = McpConfig::from_value(mcp_config(&["filesystem"]), "mcp-simple.json").unwrap();
    let err = validate_required_servers(&cfg, "mcp-simple.json", &core_servers()).unwrap_err();
    assert!(err
        .to_string()
        .contains("missing server configuration: memory in mcp-simple.json"));
}

#[test]
fn descriptor_without_command_or_args_is_rejected() {
    let no_command = json!({ "mcpServers": { "memory": { "args": [] } } });
    let cfg = McpConfig::from_value(no_command, "mcp-config.json").unwrap();
    let err = validate_server_descriptors(&cfg, "mcp-config.json").unwrap_err();
    assert!(err.to_string().contains("missing command for memory server"));

    let no_args = json!({ "mcpServers": { "memory": { "command": "node" } } });
    let cfg = McpConfig::from_value(no_args, "mcp-config.json").unwrap();
    let err = validate_server_descriptors(&cfg, "mcp-config.json").unwrap_err();
    assert!(err.to_string().contains("missing args for memory server"));
}

#[test]
fn load_mcp_config_reports_unreadable_file() {
    let fixture = ProjectFixture::empty();
    let err = load_mcp_config(fixture.path("mcp-config.json")).unwrap_err();
    assert!(err.to_string().contains("cannot read mcp-config.json"));
}

#[test]
fn settings_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
default_suite = "simple"
agent_command = "my-agent"

[config]
required_servers = ["filesystem"]

[[packages.additional]]
label = "Extra"
package = "@extra/mcp-server"

[timeouts]
lightweight_ms = 2500
"#
    )
    .unwrap();

    let settings = load_and_validate_settings(Some(file.path())).unwrap();

    assert_eq!(settings.default_suite, SuiteKind::Simple);
    assert_eq!(settings.agent_command, "my-agent");
    assert_eq!(settings.config.required_servers, vec!["filesystem".to_string()]);
    assert_eq!(settings.config.primary, "mcp-config.json");
    assert_eq!(settings.packages.additional.len(), 1);
    assert_eq!(settings.timeouts.lightweight.as_millis(), 2500);
    assert_eq!(settings.timeouts.default.as_millis(), 30_000);
}

#[test]
fn zero_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.timeouts.probe_ms = 0;

    match HarnessSettings::try_from(raw) {
        Err(SmokeError::Settings(msg)) => assert!(msg.contains("[timeouts].probe_ms")),
        other => panic!("Expected Settings error, got: {:?}", other),
    }
}

#[test]
fn unknown_settings_key_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "agent = \"typo\"\n").unwrap();

    let err = load_and_validate_settings(Some(file.path())).unwrap_err();
    assert!(matches!(err, SmokeError::Toml(_)), "got: {err:?}");
}

#[test]
fn empty_agent_command_is_rejected() {
    let mut raw = RawSettings::default();
    raw.agent_command = "  ".to_string();
    assert!(HarnessSettings::try_from(raw).is_err());
}

#[tokio::test]
async fn config_parse_check_fails_without_servers_key() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    fixture.write_json("mcp-config.json", &json!({ "other": {} }));
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let check = ConfigFilesParse {
        files: vec!["mcp-config.json".to_string()],
        require_servers_key: true,
    };
    let err = with_timeout(check.run(ctx)).await.unwrap_err();

    assert!(matches!(err, CheckError::Config(_)));
    assert!(err.to_string().contains("mcpServers"));
}

#[tokio::test]
async fn parse_only_check_accepts_any_json() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    fixture.write_json("mcp-ui.json", &json!({ "theme": "dark" }));
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let check = ConfigFilesParse {
        files: vec!["mcp-ui.json".to_string()],
        require_servers_key: false,
    };
    assert_eq!(with_timeout(check.run(ctx)).await.unwrap(), Verdict::Pass);
}

#[tokio::test]
async fn files_exist_check_names_the_first_missing_file() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    fixture.write_json("mcp-config.json", &mcp_config(&ALL_SERVERS));
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let check = ConfigFilesExist {
        files: vec!["mcp-config.json".to_string(), "mcp-dev.json".to_string()],
    };
    let err = with_timeout(check.run(ctx)).await.unwrap_err();
    assert_eq!(err.to_string(), "Configuration file not found: mcp-dev.json");
}

#[tokio::test]
async fn required_servers_check_validates_structure() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    fixture.write_json(
        "mcp-config.json",
        &json!({ "mcpServers": { "filesystem": { "command": "npx", "args": [] }, "memory": { "command": "" , "args": [] } } }),
    );
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let lenient = RequiredServers {
        file: "mcp-config.json".to_string(),
        servers: core_servers(),
        check_descriptors: false,
    };
    assert_eq!(
        with_timeout(lenient.run(ctx.clone())).await.unwrap(),
        Verdict::Pass
    );

    let strict = RequiredServers {
        check_descriptors: true,
        ..lenient
    };
    let err = with_timeout(strict.run(ctx)).await.unwrap_err();
    assert!(err.to_string().contains("missing command for memory server"));
}

#[tokio::test]
async fn required_servers_check_reports_missing_file() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let check = RequiredServers {
        file: "mcp-simple.json".to_string(),
        servers: core_servers(),
        check_descriptors: false,
    };
    let err = with_timeout(check.run(ctx)).await.unwrap_err();
    assert_eq!(err.to_string(), "mcp-simple.json not found");
}
