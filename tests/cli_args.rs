// tests/cli_args.rs

use clap::Parser;

use mcp_smoke::cli::{CliArgs, LogLevel};
use mcp_smoke::errors::SmokeError;
use mcp_smoke::logging::{build_filter, parse_level_str};
use mcp_smoke::run;
use mcp_smoke::types::SuiteKind;

#[test]
fn parses_suite_and_overrides() {
    let args = CliArgs::try_parse_from([
        "mcp-smoke",
        "--suite",
        "functional",
        "--project-root",
        "/tmp/project",
        "--timeout-ms",
        "1500",
        "--report",
        "out/report.json",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(args.suite, Some(SuiteKind::Functional));
    assert_eq!(args.project_root.as_deref(), Some("/tmp/project"));
    assert_eq!(args.timeout_ms, Some(1500));
    assert_eq!(args.report.as_deref(), Some("out/report.json"));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(!args.list);
}

#[test]
fn rejects_unknown_suite() {
    assert!(CliArgs::try_parse_from(["mcp-smoke", "--suite", "bogus"]).is_err());
}

#[test]
fn suite_kind_round_trips_through_text() {
    for kind in [SuiteKind::Server, SuiteKind::Functional, SuiteKind::Simple] {
        assert_eq!(kind.to_string().parse::<SuiteKind>().unwrap(), kind);
    }
    assert!("everything".parse::<SuiteKind>().is_err());
}

#[test]
fn log_level_strings() {
    assert_eq!(parse_level_str(" WARNING "), Some(tracing::Level::WARN));
    assert_eq!(parse_level_str("trace"), Some(tracing::Level::TRACE));
    assert_eq!(parse_level_str("loud"), None);
}

#[test]
fn log_filter_precedence() {
    // The flag wins even over an unparseable environment value.
    assert!(build_filter(Some(LogLevel::Trace), Some("mcp_smoke=loudest")).is_ok());

    assert!(build_filter(None, Some("warning")).is_ok());
    assert!(build_filter(None, Some("mcp_smoke::exec=debug")).is_ok());
    assert!(build_filter(None, None).is_ok());
    assert!(build_filter(None, Some("mcp_smoke=loudest")).is_err());
}

#[tokio::test]
async fn list_mode_exits_zero_without_running() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from(["mcp-smoke", "--list", "--project-root", root.as_str()])
        .unwrap();

    assert_eq!(run(args).await.unwrap(), 0);
    assert!(!dir.path().join("reports").exists());
}

#[tokio::test]
async fn zero_timeout_override_is_rejected() {
    let args = CliArgs::try_parse_from(["mcp-smoke", "--timeout-ms", "0", "--list"]).unwrap();

    match run(args).await {
        Err(SmokeError::Settings(msg)) => assert!(msg.contains("--timeout-ms")),
        other => panic!("Expected Settings error, got: {:?}", other),
    }
}
