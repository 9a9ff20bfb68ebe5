// tests/process_checks.rs

mod common;
use crate::common::{context, init_tracing, with_timeout, FakeProcessBackend, ProjectFixture};

use std::time::Duration;

use mcp_smoke::check::agent::{AgentAvailable, AgentLoadsConfig, ConfigRejection};
use mcp_smoke::check::heuristics::{
    rejects_config, reports_config_error, reports_missing_module, reports_missing_package,
};
use mcp_smoke::check::tooling::{
    CommandSucceeds, GlobalPackagesInstalled, PackageProbe, PackageResolvable, ScriptLoads,
};
use mcp_smoke::check::{Check, CheckError, Verdict};
use mcp_smoke::exec::ProcessOutcome;

const PKG: &str = "@context7/mcp-server";

fn resolvable() -> PackageResolvable {
    PackageResolvable {
        label: "Context7".to_string(),
        package: PKG.to_string(),
    }
}

#[test]
fn heuristics_match_their_markers() {
    let not_found = ProcessOutcome::exited(0, "", "npm ERR! 404 not found");
    assert!(reports_missing_package(&not_found));
    assert!(!reports_missing_package(&ProcessOutcome::exited(1, "", "boom")));

    let module = ProcessOutcome::exited(1, "", "Error: Cannot find module 'x'");
    assert!(reports_missing_module(&module));

    assert!(rejects_config(&ProcessOutcome::exited(1, "", "bad config")));
    assert!(!rejects_config(&ProcessOutcome::exited(0, "", "bad config")));
    assert!(!rejects_config(&ProcessOutcome::exited(1, "", "bad input")));

    assert!(reports_config_error(&ProcessOutcome::exited(0, "", "Invalid server")));
    assert!(reports_config_error(&ProcessOutcome::exited(0, "", "Error: nope")));
    assert!(!reports_config_error(&ProcessOutcome::exited(0, "usage", "")));
}

#[tokio::test]
async fn not_found_output_fails_despite_zero_exit() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new()
        .on(
            "npx",
            &["-y", PKG, "--help"],
            ProcessOutcome::exited(0, "", "404 not found"),
        )
        .fail("npm", &["list", "-g", PKG], 1, "(empty)");
    let ctx = context(fixture.root(), &backend);

    let err = with_timeout(resolvable().run(ctx)).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Context7 server not available globally or via npx"
    );
    assert_eq!(
        backend.command_lines(),
        vec![
            format!("npx -y {PKG} --help"),
            format!("npm list -g {PKG}"),
        ]
    );
}

#[tokio::test]
async fn package_resolves_through_npx() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new().on(
        "npx",
        &["-y", PKG, "--help"],
        ProcessOutcome::exited(1, "", "unknown option --help"),
    );
    let ctx = context(fixture.root(), &backend);

    assert_eq!(with_timeout(resolvable().run(ctx)).await.unwrap(), Verdict::Pass);
    assert_eq!(backend.invocations().len(), 1);
}

#[tokio::test]
async fn package_falls_back_to_global_install() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new()
        .on_missing("npx", &["-y", PKG, "--help"])
        .ok("npm", &["list", "-g", PKG], PKG);
    let ctx = context(fixture.root(), &backend);

    assert_eq!(with_timeout(resolvable().run(ctx)).await.unwrap(), Verdict::Pass);
}

#[tokio::test]
async fn package_falls_back_to_global_install_after_npx_timeout() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new()
        .on_hang("npx", &["-y", PKG, "--help"], Duration::from_millis(10))
        .ok("npm", &["list", "-g", PKG], PKG);
    let ctx = context(fixture.root(), &backend);

    assert_eq!(with_timeout(resolvable().run(ctx)).await.unwrap(), Verdict::Pass);
    assert_eq!(
        backend.command_lines(),
        vec![
            format!("npx -y {PKG} --help"),
            format!("npm list -g {PKG}"),
        ]
    );
}

#[tokio::test]
async fn npx_timeout_without_global_install_fails() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new()
        .on_hang("npx", &["-y", PKG, "--help"], Duration::from_millis(10))
        .fail("npm", &["list", "-g", PKG], 1, "");
    let ctx = context(fixture.root(), &backend);

    let err = with_timeout(resolvable().run(ctx)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Context7 server not available globally or via npx"
    );
}

#[tokio::test]
async fn command_check_fails_with_its_message() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new().fail("node", &["--version"], 127, "");
    let ctx = context(fixture.root(), &backend);

    let check = CommandSucceeds::new("node", &["--version"], "Node.js not available");
    let err = with_timeout(check.run(ctx)).await.unwrap_err();
    assert_eq!(err.to_string(), "Node.js not available");
}

#[tokio::test]
async fn command_check_runs_in_project_root_with_context_timeout() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new().ok("npm", &["--version"], "10.2.0");
    let ctx = context(fixture.root(), &backend);

    let check = CommandSucceeds::new("npm", &["--version"], "npm not available");
    assert_eq!(with_timeout(check.run(ctx)).await.unwrap(), Verdict::Pass);

    let invocation = &backend.invocations()[0];
    assert_eq!(invocation.options.cwd.as_deref(), Some(fixture.root()));
    assert_eq!(invocation.options.timeout, Duration::from_secs(1));
}

#[tokio::test]
async fn timeout_message_differs_from_assertion_failure() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend =
        FakeProcessBackend::new().on_hang("npx", &["--version"], Duration::from_millis(10));
    let ctx = context(fixture.root(), &backend);

    let check = CommandSucceeds::new("npx", &["--version"], "npx not available");
    let err = with_timeout(check.run(ctx)).await.unwrap_err();

    assert!(matches!(err, CheckError::TimedOut { .. }));
    let message = err.to_string();
    assert!(message.starts_with("Command timeout after 1000ms"), "got: {message}");
    assert!(message.contains("npx --version"));
}

#[tokio::test]
async fn script_with_missing_module_fails() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let script = fixture.write("index.js", "require('gone');\n");
    let script_arg = script.to_string_lossy().into_owned();
    let backend = FakeProcessBackend::new().fail(
        "node",
        &[script_arg.as_str(), "--help"],
        1,
        "Error: Cannot find module 'gone'",
    );
    let ctx = context(fixture.root(), &backend);

    let check = ScriptLoads {
        script,
        failure: "Memory server has missing dependencies".to_string(),
    };
    let err = with_timeout(check.run(ctx)).await.unwrap_err();
    assert_eq!(err.to_string(), "Memory server has missing dependencies");
}

#[tokio::test]
async fn global_packages_report_the_first_missing_one() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new()
        .ok("npm", &["list", "-g", "@a/one"], "")
        .fail("npm", &["list", "-g", "@b/two"], 1, "");
    let ctx = context(fixture.root(), &backend);

    let check = GlobalPackagesInstalled {
        packages: vec!["@a/one".to_string(), "@b/two".to_string()],
    };
    let err = with_timeout(check.run(ctx)).await.unwrap_err();
    assert_eq!(err.to_string(), "@b/two not installed globally");
}

#[tokio::test]
async fn package_probe_is_lenient_and_uses_its_own_timeout() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new();
    let ctx = context(fixture.root(), &backend);

    let check = PackageProbe {
        package: "@modelcontextprotocol/server-filesystem".to_string(),
        timeout: Duration::from_millis(250),
    };
    assert_eq!(with_timeout(check.run(ctx)).await.unwrap(), Verdict::Pass);
    assert_eq!(
        backend.invocations()[0].options.timeout,
        Duration::from_millis(250)
    );
}

#[tokio::test]
async fn absent_agent_is_skipped_not_passed() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let ctx = context(fixture.root(), &FakeProcessBackend::new());

    let available = AgentAvailable {
        program: "claude-code".to_string(),
    };
    let verdict = with_timeout(available.run(ctx.clone())).await.unwrap();
    assert_eq!(
        verdict,
        Verdict::Skip("claude-code not available in PATH".to_string())
    );

    let loads = AgentLoadsConfig {
        program: "claude-code".to_string(),
        config: "mcp-simple.json".into(),
        rule: ConfigRejection::ReportsError,
    };
    let verdict = with_timeout(loads.run(ctx)).await.unwrap();
    assert!(matches!(verdict, Verdict::Skip(_)));
}

#[tokio::test]
async fn agent_with_failing_version_query_is_skipped() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new().fail("claude-code", &["--version"], 1, "");
    let ctx = context(fixture.root(), &backend);

    let check = AgentAvailable {
        program: "claude-code".to_string(),
    };
    assert!(matches!(
        with_timeout(check.run(ctx)).await.unwrap(),
        Verdict::Skip(_)
    ));
}

#[tokio::test]
async fn hanging_agent_is_a_failure_not_a_skip() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let backend = FakeProcessBackend::new().on_hang(
        "claude-code",
        &["--version"],
        Duration::from_millis(10),
    );
    let ctx = context(fixture.root(), &backend);

    let check = AgentAvailable {
        program: "claude-code".to_string(),
    };
    let err = with_timeout(check.run(ctx)).await.unwrap_err();

    match &err {
        CheckError::TimedOut { command, timeout } => {
            assert_eq!(command, "claude-code --version");
            assert_eq!(*timeout, Duration::from_secs(1));
        }
        other => panic!("Expected TimedOut error, got: {:?}", other),
    }
    assert!(err.to_string().starts_with("Command timeout after 1000ms"));
}

#[tokio::test]
async fn agent_rejecting_config_fails_per_rule() {
    init_tracing();
    let fixture = ProjectFixture::empty();
    let config = fixture.path("mcp-simple.json").to_string_lossy().into_owned();
    let args = ["--mcp-config", config.as_str(), "--help"];

    // Exit 0 but stderr says Error: only the ReportsError rule fails.
    let backend = FakeProcessBackend::new().on(
        "claude-code",
        &args,
        ProcessOutcome::exited(0, "usage", "Error: bad server"),
    );
    let ctx = context(fixture.root(), &backend);

    let strict = AgentLoadsConfig {
        program: "claude-code".to_string(),
        config: "mcp-simple.json".into(),
        rule: ConfigRejection::ReportsError,
    };
    let err = with_timeout(strict.run(ctx.clone())).await.unwrap_err();
    assert_eq!(err.to_string(), "claude-code cannot parse MCP configuration");

    let lenient = AgentLoadsConfig {
        rule: ConfigRejection::NonZeroMentionsConfig,
        ..strict
    };
    assert_eq!(with_timeout(lenient.run(ctx)).await.unwrap(), Verdict::Pass);
}
